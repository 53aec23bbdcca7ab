mod common;

use engine::{AggregatedLine, EngineError, RecipeInput, RecipeSummary};

use common::{engine, ingredient, recipe, tag, user};

fn line(name: &str, unit: &str, total: i64) -> AggregatedLine {
    AggregatedLine {
        name: name.to_string(),
        unit: unit.to_string(),
        total,
    }
}

#[tokio::test]
async fn sums_equal_ingredients_across_recipes() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let sweet = tag(&engine, "sweet", "#E26C2D").await;
    let sugar = ingredient(&engine, "Sugar", "g").await;
    let salt = ingredient(&engine, "Salt", "g").await;

    let cake = recipe(&engine, alice.id, "Cake", vec![(sugar.id, 100), (salt.id, 5)], vec![sweet.id]).await;
    let jam = recipe(&engine, alice.id, "Jam", vec![(sugar.id, 50)], vec![sweet.id]).await;
    engine.add_to_shopping_list(alice.id, cake.id).await.unwrap();
    engine.add_to_shopping_list(alice.id, jam.id).await.unwrap();

    let lines = engine.aggregated_shopping_list(alice.id).await.unwrap();
    assert_eq!(lines, vec![line("Sugar", "g", 150), line("Salt", "g", 5)]);
    assert_eq!(lines[0].label(), "Sugar: 150 g");
}

#[tokio::test]
async fn same_name_with_other_unit_stays_separate() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let sweet = tag(&engine, "sweet", "#E26C2D").await;
    let sugar_g = ingredient(&engine, "Sugar", "g").await;
    let sugar_tbsp = ingredient(&engine, "Sugar", "tbsp").await;

    let tea = recipe(&engine, alice.id, "Tea", vec![(sugar_tbsp.id, 2)], vec![sweet.id]).await;
    let cake = recipe(&engine, alice.id, "Cake", vec![(sugar_g.id, 100)], vec![sweet.id]).await;
    engine.add_to_shopping_list(alice.id, tea.id).await.unwrap();
    engine.add_to_shopping_list(alice.id, cake.id).await.unwrap();

    let lines = engine.aggregated_shopping_list(alice.id).await.unwrap();
    assert_eq!(lines, vec![line("Sugar", "tbsp", 2), line("Sugar", "g", 100)]);
}

#[tokio::test]
async fn lists_are_per_user() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let bob = user(&engine, "bob").await;
    let sweet = tag(&engine, "sweet", "#E26C2D").await;
    let honey = ingredient(&engine, "Honey", "g").await;
    let cake = recipe(&engine, alice.id, "Cake", vec![(honey.id, 30)], vec![sweet.id]).await;

    engine.add_to_shopping_list(bob.id, cake.id).await.unwrap();

    assert!(engine.aggregated_shopping_list(alice.id).await.unwrap().is_empty());
    assert_eq!(
        engine.aggregated_shopping_list(bob.id).await.unwrap(),
        vec![line("Honey", "g", 30)]
    );
}

#[tokio::test]
async fn duplicate_add_fails_and_keeps_one_entry() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let sweet = tag(&engine, "sweet", "#E26C2D").await;
    let sugar = ingredient(&engine, "Sugar", "g").await;
    let cake = recipe(&engine, alice.id, "Cake", vec![(sugar.id, 100)], vec![sweet.id]).await;

    let summary = engine.add_to_shopping_list(alice.id, cake.id).await.unwrap();
    assert_eq!(
        summary,
        RecipeSummary {
            id: cake.id,
            name: "Cake".to_string(),
            image: cake.image.clone(),
            cooking_time: cake.cooking_time,
        }
    );

    let err = engine
        .add_to_shopping_list(alice.id, cake.id)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::ExistingKey("recipe is already in your shopping list".to_string())
    );
    assert_eq!(
        engine.aggregated_shopping_list(alice.id).await.unwrap(),
        vec![line("Sugar", "g", 100)]
    );

    let viewed = engine.recipe(Some(alice.id), cake.id).await.unwrap();
    assert!(viewed.is_in_shopping_cart);
}

#[tokio::test]
async fn remove_absent_entry_fails() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let sweet = tag(&engine, "sweet", "#E26C2D").await;
    let sugar = ingredient(&engine, "Sugar", "g").await;
    let cake = recipe(&engine, alice.id, "Cake", vec![(sugar.id, 100)], vec![sweet.id]).await;

    let err = engine
        .remove_from_shopping_list(alice.id, cake.id)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::NotInRelation("recipe is not in your shopping list".to_string())
    );

    engine.add_to_shopping_list(alice.id, cake.id).await.unwrap();
    engine
        .remove_from_shopping_list(alice.id, cake.id)
        .await
        .unwrap();
    assert!(engine.aggregated_shopping_list(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_recipe_is_not_found() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;

    let err = engine.add_to_shopping_list(alice.id, 999).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("recipe".to_string()));
    let err = engine.add_favorite(alice.id, 999).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("recipe".to_string()));
}

#[tokio::test]
async fn favorite_toggle_round_trip() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let bob = user(&engine, "bob").await;
    let sweet = tag(&engine, "sweet", "#E26C2D").await;
    let sugar = ingredient(&engine, "Sugar", "g").await;
    let cake = recipe(&engine, alice.id, "Cake", vec![(sugar.id, 100)], vec![sweet.id]).await;

    engine.add_favorite(bob.id, cake.id).await.unwrap();
    assert!(engine.recipe(Some(bob.id), cake.id).await.unwrap().is_favorited);
    assert!(!engine.recipe(Some(alice.id), cake.id).await.unwrap().is_favorited);

    let err = engine.add_favorite(bob.id, cake.id).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::ExistingKey("recipe is already in favorites".to_string())
    );

    engine.remove_favorite(bob.id, cake.id).await.unwrap();
    assert!(!engine.recipe(Some(bob.id), cake.id).await.unwrap().is_favorited);

    let err = engine.remove_favorite(bob.id, cake.id).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::NotInRelation("recipe is not in favorites".to_string())
    );
}

#[tokio::test]
async fn deleting_recipe_clears_lists() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let sweet = tag(&engine, "sweet", "#E26C2D").await;
    let sugar = ingredient(&engine, "Sugar", "g").await;
    let cake = recipe(&engine, alice.id, "Cake", vec![(sugar.id, 100)], vec![sweet.id]).await;

    engine.add_to_shopping_list(alice.id, cake.id).await.unwrap();
    engine.add_favorite(alice.id, cake.id).await.unwrap();
    engine.delete_recipe(alice.id, cake.id).await.unwrap();

    assert!(engine.aggregated_shopping_list(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn updated_recipe_lines_come_after_older_lines() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let sweet = tag(&engine, "sweet", "#E26C2D").await;
    let sugar = ingredient(&engine, "Sugar", "g").await;
    let salt = ingredient(&engine, "Salt", "g").await;

    let syrup = recipe(&engine, alice.id, "Syrup", vec![(sugar.id, 100)], vec![sweet.id]).await;
    let brine = recipe(&engine, alice.id, "Brine", vec![(salt.id, 5)], vec![sweet.id]).await;
    engine
        .update_recipe(
            alice.id,
            syrup.id,
            RecipeInput {
                name: "Syrup".to_string(),
                image: "syrup.png".to_string(),
                text: "Boil longer.".to_string(),
                cooking_time: 15,
                ingredients: vec![(sugar.id, 100)],
                tags: vec![sweet.id],
            },
        )
        .await
        .unwrap();
    engine.add_to_shopping_list(alice.id, syrup.id).await.unwrap();
    engine.add_to_shopping_list(alice.id, brine.id).await.unwrap();

    let lines = engine.aggregated_shopping_list(alice.id).await.unwrap();
    assert_eq!(lines, vec![line("Salt", "g", 5), line("Sugar", "g", 100)]);
}
