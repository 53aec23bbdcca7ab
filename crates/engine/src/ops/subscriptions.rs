use std::collections::HashMap;

use sea_orm::{ActiveValue, ConnectionTrait, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, RecipeSummary, ResultEngine, Subscription, UserProfile, recipes, subscriptions,
    users, util::map_unique_violation,
};

use super::{Engine, Page, Paginated};

impl Engine {
    /// `user_id` starts following `author_id`.
    ///
    /// The returned view lists at most `recipes_limit` of the author's
    /// newest recipes.
    pub async fn subscribe(
        &self,
        user_id: i32,
        author_id: i32,
        recipes_limit: Option<u64>,
    ) -> ResultEngine<Subscription> {
        if user_id == author_id {
            return Err(EngineError::InvalidInput(
                "cannot subscribe to yourself".to_string(),
            ));
        }
        let author = self.require_user(&self.database, author_id).await?;

        let row = subscriptions::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            author_id: ActiveValue::Set(author_id),
        };
        subscriptions::Entity::insert(row)
            .exec_without_returning(&self.database)
            .await
            .map_err(|err| map_unique_violation(err, "already subscribed to this author"))?;
        tracing::debug!("user {user_id} subscribed to {author_id}");

        let mut views = self
            .subscription_views(&self.database, vec![author], recipes_limit)
            .await?;
        views
            .pop()
            .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))
    }

    pub async fn unsubscribe(&self, user_id: i32, author_id: i32) -> ResultEngine<()> {
        self.require_user(&self.database, author_id).await?;
        let res = subscriptions::Entity::delete_by_id((user_id, author_id))
            .exec(&self.database)
            .await?;
        if res.rows_affected == 0 {
            return Err(EngineError::NotInRelation(
                "not subscribed to this author".to_string(),
            ));
        }
        tracing::debug!("user {user_id} unsubscribed from {author_id}");
        Ok(())
    }

    /// Authors followed by `user_id`, ordered by author id.
    pub async fn list_subscriptions(
        &self,
        user_id: i32,
        page: Page,
        recipes_limit: Option<u64>,
    ) -> ResultEngine<Paginated<Subscription>> {
        let paginator = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .order_by_asc(subscriptions::Column::AuthorId)
            .paginate(&self.database, page.size);
        let count = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.index()?).await?;

        let author_ids: Vec<i32> = rows.iter().map(|row| row.author_id).collect();
        let mut authors: HashMap<i32, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(author_ids.clone()))
            .all(&self.database)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();
        let ordered = author_ids
            .iter()
            .filter_map(|id| authors.remove(id))
            .collect();

        let items = self
            .subscription_views(&self.database, ordered, recipes_limit)
            .await?;
        Ok(Paginated { count, page, items })
    }

    /// Views of followed `authors`, in the given order.
    async fn subscription_views<C: ConnectionTrait>(
        &self,
        db: &C,
        authors: Vec<users::Model>,
        recipes_limit: Option<u64>,
    ) -> ResultEngine<Vec<Subscription>> {
        if authors.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = authors.iter().map(|a| a.id).collect();
        let mut by_author: HashMap<i32, Vec<RecipeSummary>> = HashMap::new();
        for model in recipes::Entity::find()
            .filter(recipes::Column::AuthorId.is_in(ids))
            .order_by_desc(recipes::Column::Created)
            .order_by_desc(recipes::Column::Id)
            .all(db)
            .await?
        {
            by_author
                .entry(model.author_id)
                .or_default()
                .push(RecipeSummary::from(&model));
        }

        let views = authors
            .iter()
            .map(|author| {
                let mut recipes = by_author.remove(&author.id).unwrap_or_default();
                let recipes_count = recipes.len() as u64;
                if let Some(limit) = recipes_limit {
                    recipes.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
                }
                Subscription {
                    author: UserProfile::from_model(author, true),
                    recipes,
                    recipes_count,
                }
            })
            .collect();
        Ok(views)
    }
}
