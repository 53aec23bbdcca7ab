#![allow(dead_code)]

use sea_orm::Database;

use engine::{Engine, Ingredient, NewUser, Recipe, RecipeInput, Tag, UserProfile};
use migration::MigratorTrait;

pub async fn engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

pub async fn user(engine: &Engine, username: &str) -> UserProfile {
    engine
        .register_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: username.to_string(),
            last_name: "Tester".to_string(),
            password: "password".to_string(),
            is_staff: false,
        })
        .await
        .unwrap()
}

pub async fn staff(engine: &Engine, username: &str) -> UserProfile {
    engine
        .register_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "password".to_string(),
            is_staff: true,
            ..NewUser::default()
        })
        .await
        .unwrap()
}

pub async fn tag(engine: &Engine, slug: &str, color: &str) -> Tag {
    engine.create_tag(slug, color, slug).await.unwrap()
}

pub async fn ingredient(engine: &Engine, name: &str, unit: &str) -> Ingredient {
    engine.create_ingredient(name, unit).await.unwrap()
}

pub async fn recipe(
    engine: &Engine,
    author_id: i32,
    name: &str,
    ingredients: Vec<(i32, i32)>,
    tags: Vec<i32>,
) -> Recipe {
    engine
        .create_recipe(
            author_id,
            RecipeInput {
                name: name.to_string(),
                image: format!("{}.png", name.to_lowercase()),
                text: format!("How to cook {name}."),
                cooking_time: 15,
                ingredients,
                tags,
            },
        )
        .await
        .unwrap()
}
