//! Per-user recipe sets and author subscriptions.
//!
//! Each table is keyed by the pair it links, so adding the same pair twice
//! fails on the primary key.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Recipes {
    Table,
    Id,
}

#[derive(Clone, Copy, Iden)]
enum Favorites {
    Table,
    UserId,
    RecipeId,
}

#[derive(Clone, Copy, Iden)]
enum ShoppingList {
    Table,
    UserId,
    RecipeId,
}

#[derive(Iden)]
enum Subscriptions {
    Table,
    UserId,
    AuthorId,
}

/// `(user_id, recipe_id)` table with both sides cascading on delete.
fn user_recipe_table<T>(table: T, user_id: T, recipe_id: T, name: &str) -> TableCreateStatement
where
    T: Iden + Copy + 'static,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(ColumnDef::new(user_id).integer().not_null())
        .col(ColumnDef::new(recipe_id).integer().not_null())
        .primary_key(Index::create().col(user_id).col(recipe_id))
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk-{name}-user_id"))
                .from(table, user_id)
                .to(Users::Table, Users::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(format!("fk-{name}-recipe_id"))
                .from(table, recipe_id)
                .to(Recipes::Table, Recipes::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(user_recipe_table(
                Favorites::Table,
                Favorites::UserId,
                Favorites::RecipeId,
                "favorites",
            ))
            .await?;

        manager
            .create_table(user_recipe_table(
                ShoppingList::Table,
                ShoppingList::UserId,
                ShoppingList::RecipeId,
                "shopping_list",
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subscriptions::UserId).integer().not_null())
                    .col(ColumnDef::new(Subscriptions::AuthorId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(Subscriptions::UserId)
                            .col(Subscriptions::AuthorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-subscriptions-user_id")
                            .from(Subscriptions::Table, Subscriptions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-subscriptions-author_id")
                            .from(Subscriptions::Table, Subscriptions::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-subscriptions-author_id")
                    .table(Subscriptions::Table)
                    .col(Subscriptions::AuthorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShoppingList::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Favorites::Table).to_owned())
            .await?;
        Ok(())
    }
}
