//! The module contains the `Recipe` struct, the shapes derived from it and
//! the `recipes` table.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::{Tag, UserProfile};

/// A fully loaded recipe, as seen by a given viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct Recipe {
    pub id: i32,
    pub author: UserProfile,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created: DateTime<Utc>,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<RecipeIngredient>,
    /// Viewer has the recipe in favorites. Always `false` for anonymous viewers.
    pub is_favorited: bool,
    /// Viewer has the recipe in the shopping list. Always `false` for anonymous viewers.
    pub is_in_shopping_cart: bool,
}

/// One ingredient line of a recipe, joined with the ingredient catalogue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeIngredient {
    /// Ingredient id (not the line id).
    pub id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// The short form returned by favorite, shopping-list and subscription
/// endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecipeSummary {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl From<&Model> for RecipeSummary {
    fn from(model: &Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            image: model.image.clone(),
            cooking_time: model.cooking_time,
        }
    }
}

/// Input for creating or replacing a recipe.
#[derive(Clone, Debug, Default)]
pub struct RecipeInput {
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    /// `(ingredient_id, amount)` pairs, in display order.
    pub ingredients: Vec<(i32, i32)>,
    pub tags: Vec<i32>,
}

/// Filters accepted by the recipe listing.
#[derive(Clone, Debug, Default)]
pub struct RecipeFilter {
    /// Case-insensitive name prefix.
    pub name: Option<String>,
    pub author: Option<i32>,
    /// Any of the given tag slugs.
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub name: String,
    /// Lowercased `name`, used for case-insensitive prefix search.
    pub name_norm: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i32,
    pub created: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(has_many = "super::recipe_ingredients::Entity")]
    RecipeIngredients,
    #[sea_orm(has_many = "super::recipe_tags::Entity")]
    RecipeTags,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::recipe_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeIngredients.def()
    }
}

impl Related<super::recipe_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
