mod common;

use engine::{EngineError, Page, Recipe, RecipeFilter, RecipeInput};

use common::{engine, ingredient, recipe, staff, tag, user};

#[tokio::test]
async fn create_recipe_loads_author_tags_and_lines() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let breakfast = tag(&engine, "breakfast", "#E26C2D").await;
    let flour = ingredient(&engine, "Flour", "g").await;
    let eggs = ingredient(&engine, "Eggs", "pcs").await;

    let pancakes = recipe(
        &engine,
        alice.id,
        "Pancakes",
        vec![(flour.id, 200), (eggs.id, 2)],
        vec![breakfast.id],
    )
    .await;

    assert_eq!(pancakes.name, "Pancakes");
    assert_eq!(pancakes.author.username, "alice");
    assert_eq!(pancakes.tags, vec![breakfast]);
    let lines: Vec<_> = pancakes
        .ingredients
        .iter()
        .map(|line| (line.name.as_str(), line.measurement_unit.as_str(), line.amount))
        .collect();
    assert_eq!(lines, vec![("Flour", "g", 200), ("Eggs", "pcs", 2)]);
    assert!(!pancakes.is_favorited);
    assert!(!pancakes.is_in_shopping_cart);

    let fetched = engine.recipe(None, pancakes.id).await.unwrap();
    assert_eq!(fetched, pancakes);
}

#[tokio::test]
async fn unknown_ingredient_creates_nothing() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let lunch = tag(&engine, "lunch", "#49B64E").await;

    let err = engine
        .create_recipe(
            alice.id,
            RecipeInput {
                name: "Soup".to_string(),
                image: "soup.png".to_string(),
                text: "Boil.".to_string(),
                cooking_time: 30,
                ingredients: vec![(42, 1)],
                tags: vec![lunch.id],
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("unknown ingredient 42".to_string())
    );

    let listed = engine
        .list_recipes(None, &RecipeFilter::default(), Page::default())
        .await
        .unwrap();
    assert_eq!(listed.count, 0);
}

#[tokio::test]
async fn only_author_or_staff_can_change_recipe() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let bob = user(&engine, "bob").await;
    let admin = staff(&engine, "admin").await;
    let dinner = tag(&engine, "dinner", "#8775D2").await;
    let rice = ingredient(&engine, "Rice", "g").await;
    let plov = recipe(&engine, alice.id, "Plov", vec![(rice.id, 300)], vec![dinner.id]).await;

    let err = engine.delete_recipe(bob.id, plov.id).await.unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));

    let err = engine
        .update_recipe(
            bob.id,
            plov.id,
            RecipeInput {
                name: "Stolen".to_string(),
                image: "x.png".to_string(),
                text: "x".to_string(),
                cooking_time: 1,
                ingredients: vec![(rice.id, 1)],
                tags: vec![dinner.id],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Forbidden(_)));
    assert_eq!(engine.recipe(None, plov.id).await.unwrap().name, "Plov");

    engine.delete_recipe(admin.id, plov.id).await.unwrap();
    let err = engine.recipe(None, plov.id).await.unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("recipe".to_string()));
}

#[tokio::test]
async fn update_replaces_lines_and_tags() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let breakfast = tag(&engine, "breakfast", "#E26C2D").await;
    let dinner = tag(&engine, "dinner", "#8775D2").await;
    let flour = ingredient(&engine, "Flour", "g").await;
    let milk = ingredient(&engine, "Milk", "ml").await;
    let pancakes = recipe(
        &engine,
        alice.id,
        "Pancakes",
        vec![(flour.id, 200)],
        vec![breakfast.id],
    )
    .await;

    let updated = engine
        .update_recipe(
            alice.id,
            pancakes.id,
            RecipeInput {
                name: "Crepes".to_string(),
                image: "crepes.png".to_string(),
                text: "Thinner.".to_string(),
                cooking_time: 25,
                ingredients: vec![(milk.id, 500), (flour.id, 100)],
                tags: vec![dinner.id],
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, pancakes.id);
    assert_eq!(updated.name, "Crepes");
    assert_eq!(updated.cooking_time, 25);
    assert_eq!(updated.tags, vec![dinner]);
    let amounts: Vec<_> = updated
        .ingredients
        .iter()
        .map(|line| (line.id, line.amount))
        .collect();
    assert_eq!(amounts, vec![(milk.id, 500), (flour.id, 100)]);
}

#[tokio::test]
async fn list_filters_by_name_author_and_tags() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let bob = user(&engine, "bob").await;
    let breakfast = tag(&engine, "breakfast", "#E26C2D").await;
    let lunch = tag(&engine, "lunch", "#49B64E").await;
    let dinner = tag(&engine, "dinner", "#8775D2").await;
    let egg = ingredient(&engine, "Egg", "pcs").await;

    let omelette = recipe(&engine, alice.id, "Omelette", vec![(egg.id, 3)], vec![breakfast.id]).await;
    let salad = recipe(&engine, bob.id, "Egg salad", vec![(egg.id, 2)], vec![lunch.id]).await;
    let soup = recipe(&engine, bob.id, "Egg soup", vec![(egg.id, 1)], vec![dinner.id]).await;

    let ids = |items: &[Recipe]| items.iter().map(|r| r.id).collect::<Vec<_>>();

    let all = engine
        .list_recipes(None, &RecipeFilter::default(), Page::default())
        .await
        .unwrap();
    assert_eq!(all.count, 3);
    assert_eq!(ids(&all.items), vec![soup.id, salad.id, omelette.id]);

    let by_name = engine
        .list_recipes(
            None,
            &RecipeFilter {
                name: Some("EGG".to_string()),
                ..RecipeFilter::default()
            },
            Page::default(),
        )
        .await
        .unwrap();
    assert_eq!(ids(&by_name.items), vec![soup.id, salad.id]);

    let by_author = engine
        .list_recipes(
            None,
            &RecipeFilter {
                author: Some(alice.id),
                ..RecipeFilter::default()
            },
            Page::default(),
        )
        .await
        .unwrap();
    assert_eq!(ids(&by_author.items), vec![omelette.id]);

    let by_tags = engine
        .list_recipes(
            None,
            &RecipeFilter {
                tags: vec!["breakfast".to_string(), "dinner".to_string()],
                ..RecipeFilter::default()
            },
            Page::default(),
        )
        .await
        .unwrap();
    assert_eq!(ids(&by_tags.items), vec![soup.id, omelette.id]);

    let unknown_tag = engine
        .list_recipes(
            None,
            &RecipeFilter {
                tags: vec!["brunch".to_string()],
                ..RecipeFilter::default()
            },
            Page::default(),
        )
        .await
        .unwrap();
    assert_eq!(unknown_tag.count, 0);
}

#[tokio::test]
async fn list_filters_by_viewer_sets() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let bob = user(&engine, "bob").await;
    let lunch = tag(&engine, "lunch", "#49B64E").await;
    let bread = ingredient(&engine, "Bread", "slice").await;
    let toast = recipe(&engine, alice.id, "Toast", vec![(bread.id, 2)], vec![lunch.id]).await;
    let sandwich = recipe(&engine, alice.id, "Sandwich", vec![(bread.id, 2)], vec![lunch.id]).await;

    engine.add_favorite(bob.id, toast.id).await.unwrap();
    engine.add_to_shopping_list(bob.id, sandwich.id).await.unwrap();

    let favorited = engine
        .list_recipes(
            Some(bob.id),
            &RecipeFilter {
                is_favorited: true,
                ..RecipeFilter::default()
            },
            Page::default(),
        )
        .await
        .unwrap();
    assert_eq!(favorited.count, 1);
    assert_eq!(favorited.items[0].id, toast.id);
    assert!(favorited.items[0].is_favorited);
    assert!(!favorited.items[0].is_in_shopping_cart);

    let in_cart = engine
        .list_recipes(
            Some(bob.id),
            &RecipeFilter {
                is_in_shopping_cart: true,
                ..RecipeFilter::default()
            },
            Page::default(),
        )
        .await
        .unwrap();
    assert_eq!(in_cart.count, 1);
    assert_eq!(in_cart.items[0].id, sandwich.id);

    // Anonymous viewers have no sets, so the flags are ignored.
    let anonymous = engine
        .list_recipes(
            None,
            &RecipeFilter {
                is_favorited: true,
                ..RecipeFilter::default()
            },
            Page::default(),
        )
        .await
        .unwrap();
    assert_eq!(anonymous.count, 2);
    assert!(anonymous.items.iter().all(|r| !r.is_favorited));
}

#[tokio::test]
async fn list_is_paginated() {
    let engine = engine().await;
    let alice = user(&engine, "alice").await;
    let lunch = tag(&engine, "lunch", "#49B64E").await;
    let bean = ingredient(&engine, "Bean", "g").await;
    for n in 0..7 {
        recipe(&engine, alice.id, &format!("Beans {n}"), vec![(bean.id, 100)], vec![lunch.id]).await;
    }

    let first = engine
        .list_recipes(None, &RecipeFilter::default(), Page::new(Some(1), None))
        .await
        .unwrap();
    assert_eq!(first.count, 7);
    assert_eq!(first.items.len(), 6);
    assert_eq!(first.next_page(), Some(2));
    assert_eq!(first.previous_page(), None);

    let second = engine
        .list_recipes(None, &RecipeFilter::default(), Page::new(Some(2), None))
        .await
        .unwrap();
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].name, "Beans 0");
    assert_eq!(second.next_page(), None);
}

#[tokio::test]
async fn out_of_range_page_is_invalid_input() {
    let engine = engine().await;

    let err = engine
        .list_recipes(None, &RecipeFilter::default(), Page::new(Some(u64::MAX / 2), None))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)), "{err}");

    let err = engine
        .list_users(None, Page::new(Some(u64::MAX / 2), None))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)), "{err}");
}
