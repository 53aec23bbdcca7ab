use sea_orm::{QueryFilter, QueryOrder, prelude::*};

use crate::{
    AggregatedLine, FontResource, IngredientLine, ResultEngine, ShoppingListDocument, aggregate,
    ingredients, recipe_ingredients, shopping_list,
};

use super::Engine;

impl Engine {
    /// Every ingredient line of every recipe in the owner's shopping list.
    ///
    /// Lines come in line-id order, so a recipe updated after another one
    /// contributes its lines after the other recipe's.
    pub async fn shopping_list_lines(&self, owner_id: i32) -> ResultEngine<Vec<IngredientLine>> {
        let recipe_ids: Vec<i32> = shopping_list::Entity::find()
            .filter(shopping_list::Column::UserId.eq(owner_id))
            .all(&self.database)
            .await?
            .into_iter()
            .map(|row| row.recipe_id)
            .collect();
        if recipe_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(recipe_ids))
            .order_by_asc(recipe_ingredients::Column::Id)
            .find_also_related(ingredients::Entity)
            .all(&self.database)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(line, ingredient)| {
                ingredient.map(|ingredient| IngredientLine {
                    name: ingredient.name,
                    unit: ingredient.measurement_unit,
                    amount: line.amount,
                })
            })
            .collect())
    }

    /// The owner's shopping list with equal ingredients summed.
    pub async fn aggregated_shopping_list(
        &self,
        owner_id: i32,
    ) -> ResultEngine<Vec<AggregatedLine>> {
        let lines = self.shopping_list_lines(owner_id).await?;
        Ok(aggregate(lines).collect())
    }

    /// The owner's aggregated shopping list rendered as a PDF document.
    pub async fn export_shopping_list(
        &self,
        owner_id: i32,
        font: &FontResource,
    ) -> ResultEngine<Vec<u8>> {
        let lines = self.aggregated_shopping_list(owner_id).await?;
        let document = ShoppingListDocument::new(lines);
        let bytes = document.render(font)?;
        tracing::info!(
            "exported shopping list of user {owner_id}: {} lines, {} bytes, font {}",
            document.lines().len(),
            bytes.len(),
            font.path().display()
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    use crate::{NewUser, RecipeInput};

    use super::*;

    async fn engine() -> Engine {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        Engine::builder().database(db).build().await.unwrap()
    }

    #[tokio::test]
    async fn exports_empty_list_as_pdf() {
        let engine = engine().await;
        let user = engine
            .register_user(NewUser {
                username: "cook".to_string(),
                email: "cook@example.com".to_string(),
                password: "secret".to_string(),
                ..NewUser::default()
            })
            .await
            .unwrap();

        let font = FontResource::builtin(crate::BuiltinFont::Helvetica);
        let bytes = engine.export_shopping_list(user.id, &font).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn exports_filled_list_as_pdf() {
        let engine = engine().await;
        let user = engine
            .register_user(NewUser {
                username: "cook".to_string(),
                email: "cook@example.com".to_string(),
                password: "secret".to_string(),
                ..NewUser::default()
            })
            .await
            .unwrap();
        let tag = engine.create_tag("Breakfast", "#E26C2D", "breakfast").await.unwrap();
        let flour = engine.create_ingredient("Flour", "g").await.unwrap();
        let recipe = engine
            .create_recipe(
                user.id,
                RecipeInput {
                    name: "Bread".to_string(),
                    image: "bread.png".to_string(),
                    text: "Bake it.".to_string(),
                    cooking_time: 60,
                    ingredients: vec![(flour.id, 500)],
                    tags: vec![tag.id],
                },
            )
            .await
            .unwrap();
        engine.add_to_shopping_list(user.id, recipe.id).await.unwrap();

        let font = FontResource::builtin(crate::BuiltinFont::Helvetica);
        let bytes = engine.export_shopping_list(user.id, &font).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
