use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    EngineError, Ingredient, ResultEngine, ingredients,
    util::{map_unique_violation, normalize_name_key, normalize_required_text, prefix_pattern},
};

use super::Engine;

impl Engine {
    /// Adds an ingredient to the catalogue.
    ///
    /// The `(name, measurement_unit)` pair must be new.
    pub async fn create_ingredient(
        &self,
        name: &str,
        measurement_unit: &str,
    ) -> ResultEngine<Ingredient> {
        let name = normalize_required_text(name, "ingredient name")?;
        let measurement_unit = normalize_required_text(measurement_unit, "measurement unit")?;

        let active = ingredients::ActiveModel {
            id: ActiveValue::NotSet,
            name_norm: ActiveValue::Set(normalize_name_key(&name)),
            name: ActiveValue::Set(name),
            measurement_unit: ActiveValue::Set(measurement_unit),
        };
        let model = active
            .insert(&self.database)
            .await
            .map_err(|err| map_unique_violation(err, "ingredient already exists"))?;
        Ok(model.into())
    }

    /// Catalogue ordered by name, optionally restricted to names starting
    /// with `name_prefix` (case-insensitive).
    pub async fn list_ingredients(
        &self,
        name_prefix: Option<&str>,
    ) -> ResultEngine<Vec<Ingredient>> {
        let mut query = ingredients::Entity::find()
            .order_by_asc(ingredients::Column::NameNorm)
            .order_by_asc(ingredients::Column::Id);
        if let Some(prefix) = name_prefix.map(str::trim).filter(|p| !p.is_empty()) {
            query = query.filter(ingredients::Column::NameNorm.like(prefix_pattern(prefix)));
        }

        let models = query.all(&self.database).await?;
        Ok(models.into_iter().map(Ingredient::from).collect())
    }

    pub async fn ingredient(&self, ingredient_id: i32) -> ResultEngine<Ingredient> {
        ingredients::Entity::find_by_id(ingredient_id)
            .one(&self.database)
            .await?
            .map(Ingredient::from)
            .ok_or_else(|| EngineError::KeyNotFound("ingredient".to_string()))
    }
}
