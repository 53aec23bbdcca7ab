//! Engine records to wire shapes.
//!
//! Recipes have two mappings: [`recipe_view`] for reads and
//! [`recipe_written`] for the response to create and update.

use api_types::{
    Page,
    ingredient::IngredientView,
    recipe::{RecipeIngredientView, RecipeShort, RecipeView, RecipeWritten},
    subscription::SubscriptionView,
    tag::TagView,
    user::UserView,
};
use engine::{
    Ingredient, Paginated, Recipe, RecipeIngredient, RecipeSummary, Subscription, Tag,
    UserProfile,
};

pub(crate) fn page<T, V>(paginated: Paginated<T>, map: impl Fn(T) -> V) -> Page<V> {
    let next = paginated.next_page();
    let previous = paginated.previous_page();
    Page {
        count: paginated.count,
        next,
        previous,
        results: paginated.items.into_iter().map(map).collect(),
    }
}

pub(crate) fn tag_view(tag: Tag) -> TagView {
    TagView {
        id: tag.id,
        name: tag.name,
        color: tag.color,
        slug: tag.slug,
    }
}

pub(crate) fn ingredient_view(ingredient: Ingredient) -> IngredientView {
    IngredientView {
        id: ingredient.id,
        name: ingredient.name,
        measurement_unit: ingredient.measurement_unit,
    }
}

pub(crate) fn user_view(user: UserProfile) -> UserView {
    UserView {
        id: user.id,
        email: user.email,
        username: user.username,
        first_name: user.first_name,
        last_name: user.last_name,
        is_subscribed: user.is_subscribed,
    }
}

fn line_view(line: RecipeIngredient) -> RecipeIngredientView {
    RecipeIngredientView {
        id: line.id,
        name: line.name,
        measurement_unit: line.measurement_unit,
        amount: line.amount,
    }
}

pub(crate) fn recipe_view(recipe: Recipe) -> RecipeView {
    RecipeView {
        id: recipe.id,
        tags: recipe.tags.into_iter().map(tag_view).collect(),
        author: user_view(recipe.author),
        ingredients: recipe.ingredients.into_iter().map(line_view).collect(),
        is_favorited: recipe.is_favorited,
        is_in_shopping_cart: recipe.is_in_shopping_cart,
        name: recipe.name,
        image: recipe.image,
        text: recipe.text,
        cooking_time: recipe.cooking_time,
    }
}

pub(crate) fn recipe_written(recipe: Recipe) -> RecipeWritten {
    RecipeWritten {
        id: recipe.id,
        author: user_view(recipe.author),
        ingredients: recipe.ingredients.into_iter().map(line_view).collect(),
        tags: recipe.tags.iter().map(|tag| tag.id).collect(),
        image: recipe.image,
        name: recipe.name,
        text: recipe.text,
        cooking_time: recipe.cooking_time,
    }
}

pub(crate) fn recipe_short(recipe: RecipeSummary) -> RecipeShort {
    RecipeShort {
        id: recipe.id,
        name: recipe.name,
        image: recipe.image,
        cooking_time: recipe.cooking_time,
    }
}

pub(crate) fn subscription_view(subscription: Subscription) -> SubscriptionView {
    let author = subscription.author;
    SubscriptionView {
        id: author.id,
        email: author.email,
        username: author.username,
        first_name: author.first_name,
        last_name: author.last_name,
        is_subscribed: author.is_subscribed,
        recipes: subscription.recipes.into_iter().map(recipe_short).collect(),
        recipes_count: subscription.recipes_count,
    }
}
