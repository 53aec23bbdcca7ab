use serde::{Deserialize, Serialize};

/// Envelope of every paginated list.
///
/// `next` and `previous` are page numbers, `null` at either end.
#[derive(Debug, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<u64>,
    pub previous: Option<u64>,
    pub results: Vec<T>,
}

/// `page` and `limit` query parameters.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

pub mod tag {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TagView {
        pub id: i32,
        pub name: String,
        /// `#RRGGBB`
        pub color: String,
        pub slug: String,
    }
}

pub mod ingredient {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IngredientView {
        pub id: i32,
        pub name: String,
        pub measurement_unit: String,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct IngredientSearch {
        /// Case-insensitive name prefix.
        pub name: Option<String>,
    }
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i32,
        pub email: String,
        pub username: String,
        pub first_name: String,
        pub last_name: String,
        /// Whether the caller follows this user. Always `false` for anonymous callers.
        pub is_subscribed: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserNew {
        pub email: String,
        pub username: String,
        #[serde(default)]
        pub first_name: String,
        #[serde(default)]
        pub last_name: String,
        pub password: String,
    }

    /// Response to a registration; the password is never echoed.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserCreated {
        pub id: i32,
        pub email: String,
        pub username: String,
        pub first_name: String,
        pub last_name: String,
    }
}

pub mod recipe {
    use super::*;
    use crate::{tag::TagView, user::UserView};

    /// One ingredient line as shown inside a recipe.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeIngredientView {
        pub id: i32,
        pub name: String,
        pub measurement_unit: String,
        pub amount: i32,
    }

    /// Read shape, returned by list and get.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeView {
        pub id: i32,
        pub tags: Vec<TagView>,
        pub author: UserView,
        pub ingredients: Vec<RecipeIngredientView>,
        pub is_favorited: bool,
        pub is_in_shopping_cart: bool,
        pub name: String,
        pub image: String,
        pub text: String,
        pub cooking_time: i32,
    }

    /// Write shape, returned by create and update. Tags are plain ids.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeWritten {
        pub id: i32,
        pub author: UserView,
        pub ingredients: Vec<RecipeIngredientView>,
        pub tags: Vec<i32>,
        pub image: String,
        pub name: String,
        pub text: String,
        pub cooking_time: i32,
    }

    /// Short shape used by favorites, the shopping cart and subscriptions.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeShort {
        pub id: i32,
        pub name: String,
        pub image: String,
        pub cooking_time: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IngredientAmount {
        pub id: i32,
        pub amount: i32,
    }

    /// Body of create and update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeWrite {
        pub ingredients: Vec<IngredientAmount>,
        pub tags: Vec<i32>,
        pub image: String,
        pub name: String,
        pub text: String,
        pub cooking_time: i32,
    }

    /// Listing filters plus pagination.
    ///
    /// `tags` may repeat (`?tags=lunch&tags=dinner`) and matches any of them.
    /// The two flags take `1` or `0`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct RecipeQuery {
        pub page: Option<u64>,
        pub limit: Option<u64>,
        pub name: Option<String>,
        pub author: Option<i32>,
        #[serde(default)]
        pub tags: Vec<String>,
        pub is_favorited: Option<u8>,
        pub is_in_shopping_cart: Option<u8>,
    }
}

pub mod subscription {
    use super::*;
    use crate::recipe::RecipeShort;

    /// A followed author with their newest recipes.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubscriptionView {
        pub id: i32,
        pub email: String,
        pub username: String,
        pub first_name: String,
        pub last_name: String,
        pub is_subscribed: bool,
        pub recipes: Vec<RecipeShort>,
        pub recipes_count: u64,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SubscriptionQuery {
        pub page: Option<u64>,
        pub limit: Option<u64>,
        pub recipes_limit: Option<u64>,
    }
}
