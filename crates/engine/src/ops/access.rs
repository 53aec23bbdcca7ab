use std::collections::HashSet;

use sea_orm::{ConnectionTrait, QueryFilter, prelude::*};

use crate::{
    EngineError, ResultEngine, favorites, recipes, shopping_list, subscriptions, users,
};

use super::Engine;

impl Engine {
    pub(super) async fn require_user<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
    ) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))
    }

    pub(super) async fn require_recipe<C: ConnectionTrait>(
        &self,
        db: &C,
        recipe_id: i32,
    ) -> ResultEngine<recipes::Model> {
        recipes::Entity::find_by_id(recipe_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("recipe".to_string()))
    }

    /// The recipe, if `actor_id` is its author or a staff user.
    pub(super) async fn require_recipe_write<C: ConnectionTrait>(
        &self,
        db: &C,
        recipe_id: i32,
        actor_id: i32,
    ) -> ResultEngine<recipes::Model> {
        let recipe = self.require_recipe(db, recipe_id).await?;
        if recipe.author_id == actor_id {
            return Ok(recipe);
        }
        let actor = self.require_user(db, actor_id).await?;
        if !actor.is_staff {
            return Err(EngineError::Forbidden(
                "only the author can change this recipe".to_string(),
            ));
        }
        Ok(recipe)
    }

    /// Ids among `recipe_ids` that `user_id` marked as favorite.
    pub(super) async fn favorited_among<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> ResultEngine<HashSet<i32>> {
        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let rows = favorites::Entity::find()
            .filter(favorites::Column::UserId.eq(user_id))
            .filter(favorites::Column::RecipeId.is_in(recipe_ids.to_vec()))
            .all(db)
            .await?;
        Ok(rows.into_iter().map(|row| row.recipe_id).collect())
    }

    /// Ids among `recipe_ids` that `user_id` has in the shopping list.
    pub(super) async fn in_cart_among<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
        recipe_ids: &[i32],
    ) -> ResultEngine<HashSet<i32>> {
        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let rows = shopping_list::Entity::find()
            .filter(shopping_list::Column::UserId.eq(user_id))
            .filter(shopping_list::Column::RecipeId.is_in(recipe_ids.to_vec()))
            .all(db)
            .await?;
        Ok(rows.into_iter().map(|row| row.recipe_id).collect())
    }

    /// Ids among `author_ids` that `user_id` follows.
    pub(super) async fn followed_among<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
        author_ids: &[i32],
    ) -> ResultEngine<HashSet<i32>> {
        if author_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let rows = subscriptions::Entity::find()
            .filter(subscriptions::Column::UserId.eq(user_id))
            .filter(subscriptions::Column::AuthorId.is_in(author_ids.to_vec()))
            .all(db)
            .await?;
        Ok(rows.into_iter().map(|row| row.author_id).collect())
    }
}
