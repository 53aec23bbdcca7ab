use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*,
};

use crate::{
    EngineError, Recipe, RecipeFilter, RecipeIngredient, RecipeInput, ResultEngine, Tag,
    UserProfile, favorites, ingredients, recipe_ingredients, recipe_tags, recipes, shopping_list,
    tags, users,
    util::{normalize_name_key, normalize_required_text, prefix_pattern},
};

use super::{Engine, Page, Paginated, with_tx};

/// A `RecipeInput` that passed validation.
#[derive(Debug)]
struct ValidRecipe {
    name: String,
    image: String,
    text: String,
    cooking_time: i32,
    ingredients: Vec<(i32, i32)>,
    tags: Vec<i32>,
}

fn validate_recipe(input: RecipeInput) -> ResultEngine<ValidRecipe> {
    let name = normalize_required_text(&input.name, "recipe name")?;
    let text = normalize_required_text(&input.text, "recipe text")?;
    let image = normalize_required_text(&input.image, "recipe image")?;
    if input.cooking_time < 1 {
        return Err(EngineError::InvalidInput(
            "cooking time must be at least 1 minute".to_string(),
        ));
    }

    if input.ingredients.is_empty() {
        return Err(EngineError::InvalidInput(
            "a recipe needs at least one ingredient".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for (ingredient_id, amount) in &input.ingredients {
        if *amount < 1 {
            return Err(EngineError::InvalidInput(format!(
                "amount of ingredient {ingredient_id} must be at least 1"
            )));
        }
        if !seen.insert(*ingredient_id) {
            return Err(EngineError::InvalidInput(format!(
                "ingredient {ingredient_id} is listed twice"
            )));
        }
    }

    if input.tags.is_empty() {
        return Err(EngineError::InvalidInput(
            "a recipe needs at least one tag".to_string(),
        ));
    }
    let mut seen = HashSet::new();
    for tag_id in &input.tags {
        if !seen.insert(*tag_id) {
            return Err(EngineError::InvalidInput(format!(
                "tag {tag_id} is listed twice"
            )));
        }
    }

    Ok(ValidRecipe {
        name,
        image,
        text,
        cooking_time: input.cooking_time,
        ingredients: input.ingredients,
        tags: input.tags,
    })
}

impl Engine {
    /// Publishes a recipe authored by `author_id`.
    pub async fn create_recipe(&self, author_id: i32, input: RecipeInput) -> ResultEngine<Recipe> {
        let valid = validate_recipe(input)?;
        let recipe_id = self.insert_recipe(author_id, valid).await?;
        tracing::info!("user {author_id} created recipe {recipe_id}");
        self.recipe(Some(author_id), recipe_id).await
    }

    /// Replaces every field, ingredient line and tag of a recipe.
    ///
    /// Only the author or a staff user may do this.
    pub async fn update_recipe(
        &self,
        actor_id: i32,
        recipe_id: i32,
        input: RecipeInput,
    ) -> ResultEngine<Recipe> {
        let valid = validate_recipe(input)?;
        self.replace_recipe(actor_id, recipe_id, valid).await?;
        tracing::info!("user {actor_id} updated recipe {recipe_id}");
        self.recipe(Some(actor_id), recipe_id).await
    }

    /// Deletes a recipe together with its lines, tags, favorites and
    /// shopping list entries. Only the author or a staff user may do this.
    pub async fn delete_recipe(&self, actor_id: i32, recipe_id: i32) -> ResultEngine<()> {
        self.require_recipe_write(&self.database, recipe_id, actor_id)
            .await?;
        recipes::Entity::delete_by_id(recipe_id)
            .exec(&self.database)
            .await?;
        tracing::info!("user {actor_id} deleted recipe {recipe_id}");
        Ok(())
    }

    /// A single recipe as seen by `viewer`.
    pub async fn recipe(&self, viewer: Option<i32>, recipe_id: i32) -> ResultEngine<Recipe> {
        let model = self.require_recipe(&self.database, recipe_id).await?;
        let mut loaded = self.load_recipes(&self.database, viewer, vec![model]).await?;
        loaded
            .pop()
            .ok_or_else(|| EngineError::KeyNotFound("recipe".to_string()))
    }

    /// Newest recipes first, filtered and paginated.
    pub async fn list_recipes(
        &self,
        viewer: Option<i32>,
        filter: &RecipeFilter,
        page: Page,
    ) -> ResultEngine<Paginated<Recipe>> {
        let mut query = recipes::Entity::find();

        if let Some(name) = filter.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            query = query.filter(recipes::Column::NameNorm.like(prefix_pattern(name)));
        }
        if let Some(author) = filter.author {
            query = query.filter(recipes::Column::AuthorId.eq(author));
        }
        if !filter.tags.is_empty() {
            let tagged = self.recipe_ids_with_tags(&filter.tags).await?;
            query = query.filter(recipes::Column::Id.is_in(tagged));
        }
        if let Some(viewer) = viewer {
            if filter.is_favorited {
                let ids: Vec<i32> = favorites::Entity::find()
                    .filter(favorites::Column::UserId.eq(viewer))
                    .all(&self.database)
                    .await?
                    .into_iter()
                    .map(|row| row.recipe_id)
                    .collect();
                query = query.filter(recipes::Column::Id.is_in(ids));
            }
            if filter.is_in_shopping_cart {
                let ids: Vec<i32> = shopping_list::Entity::find()
                    .filter(shopping_list::Column::UserId.eq(viewer))
                    .all(&self.database)
                    .await?
                    .into_iter()
                    .map(|row| row.recipe_id)
                    .collect();
                query = query.filter(recipes::Column::Id.is_in(ids));
            }
        }

        let paginator = query
            .order_by_desc(recipes::Column::Created)
            .order_by_desc(recipes::Column::Id)
            .paginate(&self.database, page.size);
        let count = paginator.num_items().await?;
        let models = paginator.fetch_page(page.index()?).await?;
        let items = self.load_recipes(&self.database, viewer, models).await?;

        Ok(Paginated { count, page, items })
    }

    /// Ids of recipes carrying any of `slugs`.
    async fn recipe_ids_with_tags(&self, slugs: &[String]) -> ResultEngine<Vec<i32>> {
        let rows = recipe_tags::Entity::find()
            .inner_join(tags::Entity)
            .filter(tags::Column::Slug.is_in(slugs.to_vec()))
            .all(&self.database)
            .await?;
        let ids: HashSet<i32> = rows.into_iter().map(|row| row.recipe_id).collect();
        Ok(ids.into_iter().collect())
    }

    async fn insert_recipe(&self, author_id: i32, valid: ValidRecipe) -> ResultEngine<i32> {
        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, author_id).await?;
            self.require_links_exist(&db_tx, &valid).await?;

            let active = recipes::ActiveModel {
                id: ActiveValue::NotSet,
                author_id: ActiveValue::Set(author_id),
                name_norm: ActiveValue::Set(normalize_name_key(&valid.name)),
                name: ActiveValue::Set(valid.name.clone()),
                image: ActiveValue::Set(valid.image.clone()),
                text: ActiveValue::Set(valid.text.clone()),
                cooking_time: ActiveValue::Set(valid.cooking_time),
                created: ActiveValue::Set(Utc::now()),
            };
            let model = active.insert(&db_tx).await?;
            self.write_links(&db_tx, model.id, &valid).await?;
            Ok(model.id)
        })
    }

    async fn replace_recipe(
        &self,
        actor_id: i32,
        recipe_id: i32,
        valid: ValidRecipe,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_recipe_write(&db_tx, recipe_id, actor_id)
                .await?;
            self.require_links_exist(&db_tx, &valid).await?;

            let mut active: recipes::ActiveModel = model.into();
            active.name_norm = ActiveValue::Set(normalize_name_key(&valid.name));
            active.name = ActiveValue::Set(valid.name.clone());
            active.image = ActiveValue::Set(valid.image.clone());
            active.text = ActiveValue::Set(valid.text.clone());
            active.cooking_time = ActiveValue::Set(valid.cooking_time);
            active.update(&db_tx).await?;

            recipe_ingredients::Entity::delete_many()
                .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
                .exec(&db_tx)
                .await?;
            recipe_tags::Entity::delete_many()
                .filter(recipe_tags::Column::RecipeId.eq(recipe_id))
                .exec(&db_tx)
                .await?;
            self.write_links(&db_tx, recipe_id, &valid).await?;
            Ok(())
        })
    }

    /// Every ingredient and tag referenced by `valid` must exist.
    async fn require_links_exist(
        &self,
        db_tx: &DatabaseTransaction,
        valid: &ValidRecipe,
    ) -> ResultEngine<()> {
        let wanted: Vec<i32> = valid.ingredients.iter().map(|(id, _)| *id).collect();
        let found: HashSet<i32> = ingredients::Entity::find()
            .filter(ingredients::Column::Id.is_in(wanted.clone()))
            .all(db_tx)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect();
        if let Some(missing) = wanted.iter().find(|id| !found.contains(id)) {
            return Err(EngineError::InvalidInput(format!(
                "unknown ingredient {missing}"
            )));
        }

        let found: HashSet<i32> = tags::Entity::find()
            .filter(tags::Column::Id.is_in(valid.tags.clone()))
            .all(db_tx)
            .await?
            .into_iter()
            .map(|m| m.id)
            .collect();
        if let Some(missing) = valid.tags.iter().find(|id| !found.contains(id)) {
            return Err(EngineError::InvalidInput(format!("unknown tag {missing}")));
        }
        Ok(())
    }

    async fn write_links(
        &self,
        db_tx: &DatabaseTransaction,
        recipe_id: i32,
        valid: &ValidRecipe,
    ) -> ResultEngine<()> {
        let lines = valid
            .ingredients
            .iter()
            .map(|(ingredient_id, amount)| recipe_ingredients::ActiveModel {
                id: ActiveValue::NotSet,
                recipe_id: ActiveValue::Set(recipe_id),
                ingredient_id: ActiveValue::Set(*ingredient_id),
                amount: ActiveValue::Set(*amount),
            });
        recipe_ingredients::Entity::insert_many(lines)
            .exec_without_returning(db_tx)
            .await?;

        let links = valid.tags.iter().map(|tag_id| recipe_tags::ActiveModel {
            recipe_id: ActiveValue::Set(recipe_id),
            tag_id: ActiveValue::Set(*tag_id),
        });
        recipe_tags::Entity::insert_many(links)
            .exec_without_returning(db_tx)
            .await?;
        Ok(())
    }

    /// Attach authors, tags, ingredient lines and viewer flags to `models`,
    /// keeping their order.
    pub(super) async fn load_recipes<C: ConnectionTrait>(
        &self,
        db: &C,
        viewer: Option<i32>,
        models: Vec<recipes::Model>,
    ) -> ResultEngine<Vec<Recipe>> {
        if models.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i32> = models.iter().map(|m| m.id).collect();
        let author_ids: Vec<i32> = models
            .iter()
            .map(|m| m.author_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let authors: HashMap<i32, users::Model> = users::Entity::find()
            .filter(users::Column::Id.is_in(author_ids.clone()))
            .all(db)
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let mut tags_by_recipe: HashMap<i32, Vec<Tag>> = HashMap::new();
        for (link, tag) in recipe_tags::Entity::find()
            .filter(recipe_tags::Column::RecipeId.is_in(ids.clone()))
            .order_by_asc(recipe_tags::Column::TagId)
            .find_also_related(tags::Entity)
            .all(db)
            .await?
        {
            if let Some(tag) = tag {
                tags_by_recipe
                    .entry(link.recipe_id)
                    .or_default()
                    .push(tag.into());
            }
        }

        let mut lines_by_recipe: HashMap<i32, Vec<RecipeIngredient>> = HashMap::new();
        for (line, ingredient) in recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.is_in(ids.clone()))
            .order_by_asc(recipe_ingredients::Column::Id)
            .find_also_related(ingredients::Entity)
            .all(db)
            .await?
        {
            if let Some(ingredient) = ingredient {
                lines_by_recipe
                    .entry(line.recipe_id)
                    .or_default()
                    .push(RecipeIngredient {
                        id: ingredient.id,
                        name: ingredient.name,
                        measurement_unit: ingredient.measurement_unit,
                        amount: line.amount,
                    });
            }
        }

        let (favorited, in_cart, followed) = match viewer {
            Some(viewer) => (
                self.favorited_among(db, viewer, &ids).await?,
                self.in_cart_among(db, viewer, &ids).await?,
                self.followed_among(db, viewer, &author_ids).await?,
            ),
            None => Default::default(),
        };

        models
            .into_iter()
            .map(|model| {
                let author = authors
                    .get(&model.author_id)
                    .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))?;
                Ok(Recipe {
                    id: model.id,
                    author: UserProfile::from_model(author, followed.contains(&author.id)),
                    tags: tags_by_recipe.remove(&model.id).unwrap_or_default(),
                    ingredients: lines_by_recipe.remove(&model.id).unwrap_or_default(),
                    is_favorited: favorited.contains(&model.id),
                    is_in_shopping_cart: in_cart.contains(&model.id),
                    name: model.name,
                    image: model.image,
                    text: model.text,
                    cooking_time: model.cooking_time,
                    created: model.created,
                })
            })
            .collect()
    }
}
