pub use aggregation::{AggregatedLine, IngredientLine, aggregate};
pub use error::{EngineError, ExportError};
pub use export::{
    EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME, FontResource, ShoppingListDocument,
};
pub use ingredients::Ingredient;
pub use printpdf::BuiltinFont;
pub use ops::{DEFAULT_PAGE_SIZE, Engine, EngineBuilder, MAX_PAGE_SIZE, Page, Paginated};
pub use recipes::{Recipe, RecipeFilter, RecipeIngredient, RecipeInput, RecipeSummary};
pub use subscriptions::Subscription;
pub use tags::Tag;
pub use users::{Account, NewUser, UserProfile};

mod aggregation;
mod error;
mod export;
mod favorites;
mod ingredients;
mod ops;
mod recipe_ingredients;
mod recipe_tags;
mod recipes;
mod shopping_list;
mod subscriptions;
mod tags;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
