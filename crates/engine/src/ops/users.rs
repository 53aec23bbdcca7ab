use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    Account, EngineError, NewUser, ResultEngine, UserProfile, users,
    util::{hash_password, map_unique_violation, normalize_required_text, verify_password},
};

use super::{Engine, Page, Paginated};

impl Engine {
    /// Registers a user. Username and email must be unused.
    pub async fn register_user(&self, new_user: NewUser) -> ResultEngine<UserProfile> {
        let username = normalize_required_text(&new_user.username, "username")?;
        let email = normalize_required_text(&new_user.email, "email")?.to_lowercase();
        if !email.contains('@') {
            return Err(EngineError::InvalidInput(format!("invalid email '{email}'")));
        }
        if new_user.password.is_empty() {
            return Err(EngineError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }

        if users::Entity::find()
            .filter(users::Column::Username.eq(username.clone()))
            .one(&self.database)
            .await?
            .is_some()
        {
            return Err(EngineError::ExistingKey(format!(
                "username '{username}' is already taken"
            )));
        }
        if users::Entity::find()
            .filter(users::Column::Email.eq(email.clone()))
            .one(&self.database)
            .await?
            .is_some()
        {
            return Err(EngineError::ExistingKey(format!(
                "email '{email}' is already registered"
            )));
        }

        let active = users::ActiveModel {
            id: ActiveValue::NotSet,
            username: ActiveValue::Set(username),
            email: ActiveValue::Set(email),
            first_name: ActiveValue::Set(new_user.first_name.trim().to_string()),
            last_name: ActiveValue::Set(new_user.last_name.trim().to_string()),
            password: ActiveValue::Set(hash_password(&new_user.password)?),
            is_staff: ActiveValue::Set(new_user.is_staff),
        };
        let model = active
            .insert(&self.database)
            .await
            .map_err(|err| map_unique_violation(err, "username or email already taken"))?;

        tracing::info!("registered user {}", model.username);
        Ok(UserProfile::from_model(&model, false))
    }

    /// Checks Basic-auth style credentials.
    ///
    /// Returns `None` for an unknown username or a wrong password.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> ResultEngine<Option<Account>> {
        let Some(model) = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.database)
            .await?
        else {
            return Ok(None);
        };

        Ok(verify_password(password, &model.password).then(|| Account::from(&model)))
    }

    /// Public profile of `user_id` as seen by `viewer`.
    pub async fn user_profile(
        &self,
        viewer: Option<i32>,
        user_id: i32,
    ) -> ResultEngine<UserProfile> {
        let model = self.require_user(&self.database, user_id).await?;
        let is_subscribed = match viewer {
            Some(viewer) => self
                .followed_among(&self.database, viewer, &[model.id])
                .await?
                .contains(&model.id),
            None => false,
        };
        Ok(UserProfile::from_model(&model, is_subscribed))
    }

    /// All users, ordered by id.
    pub async fn list_users(
        &self,
        viewer: Option<i32>,
        page: Page,
    ) -> ResultEngine<Paginated<UserProfile>> {
        let paginator = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .paginate(&self.database, page.size);
        let count = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()?).await?;

        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let followed = match viewer {
            Some(viewer) => self.followed_among(&self.database, viewer, &ids).await?,
            None => Default::default(),
        };

        let items = models
            .iter()
            .map(|m| UserProfile::from_model(m, followed.contains(&m.id)))
            .collect();
        Ok(Paginated { count, page, items })
    }
}
