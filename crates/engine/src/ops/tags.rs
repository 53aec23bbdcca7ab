use sea_orm::{ActiveValue, QueryOrder, prelude::*};

use crate::{
    EngineError, ResultEngine, Tag, tags,
    util::{map_unique_violation, normalize_required_text, validate_color, validate_slug},
};

use super::Engine;

impl Engine {
    /// Creates a tag. Name, color and slug must each be unused.
    pub async fn create_tag(&self, name: &str, color: &str, slug: &str) -> ResultEngine<Tag> {
        let active = tags::ActiveModel {
            id: ActiveValue::NotSet,
            name: ActiveValue::Set(normalize_required_text(name, "tag name")?),
            color: ActiveValue::Set(validate_color(color)?),
            slug: ActiveValue::Set(validate_slug(slug)?),
        };
        let model = active
            .insert(&self.database)
            .await
            .map_err(|err| map_unique_violation(err, "tag already exists"))?;
        Ok(model.into())
    }

    pub async fn list_tags(&self) -> ResultEngine<Vec<Tag>> {
        let models = tags::Entity::find()
            .order_by_asc(tags::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Tag::from).collect())
    }

    pub async fn tag(&self, tag_id: i32) -> ResultEngine<Tag> {
        tags::Entity::find_by_id(tag_id)
            .one(&self.database)
            .await?
            .map(Tag::from)
            .ok_or_else(|| EngineError::KeyNotFound("tag".to_string()))
    }
}
