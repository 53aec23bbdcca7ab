use sea_orm::{ActiveValue, prelude::*};

use crate::{
    EngineError, RecipeSummary, ResultEngine, favorites, shopping_list,
    util::map_unique_violation,
};

use super::Engine;

/// Generates the add/remove pair for a per-user set of recipes backed by a
/// `(user_id, recipe_id)` table.
macro_rules! impl_recipe_set {
    (
        $(#[$add_meta:meta])* $add:ident,
        $(#[$remove_meta:meta])* $remove:ident,
        $table:ident,
        $already:literal,
        $absent:literal
    ) => {
        $(#[$add_meta])*
        pub async fn $add(&self, user_id: i32, recipe_id: i32) -> ResultEngine<RecipeSummary> {
            let recipe = self.require_recipe(&self.database, recipe_id).await?;
            let row = $table::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                recipe_id: ActiveValue::Set(recipe_id),
            };
            $table::Entity::insert(row)
                .exec_without_returning(&self.database)
                .await
                .map_err(|err| map_unique_violation(err, $already))?;

            tracing::debug!(
                "user {user_id} added recipe {recipe_id} to {}",
                stringify!($table)
            );
            Ok(RecipeSummary::from(&recipe))
        }

        $(#[$remove_meta])*
        pub async fn $remove(&self, user_id: i32, recipe_id: i32) -> ResultEngine<()> {
            self.require_recipe(&self.database, recipe_id).await?;
            let res = $table::Entity::delete_by_id((user_id, recipe_id))
                .exec(&self.database)
                .await?;
            if res.rows_affected == 0 {
                return Err(EngineError::NotInRelation($absent.to_string()));
            }

            tracing::debug!(
                "user {user_id} removed recipe {recipe_id} from {}",
                stringify!($table)
            );
            Ok(())
        }
    };
}

impl Engine {
    impl_recipe_set!(
        /// Marks a recipe as favorite.
        add_favorite,
        /// Unmarks a favorite recipe.
        remove_favorite,
        favorites,
        "recipe is already in favorites",
        "recipe is not in favorites"
    );

    impl_recipe_set!(
        /// Puts a recipe in the user's shopping list.
        add_to_shopping_list,
        /// Takes a recipe out of the user's shopping list.
        remove_from_shopping_list,
        shopping_list,
        "recipe is already in your shopping list",
        "recipe is not in your shopping list"
    );
}
