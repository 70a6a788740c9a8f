use async_trait::async_trait;
use sqlx::{Postgres, Transaction};

use crate::{
    application::repos::{
        CollectionSource, CreateItemParams, ItemsWriteRepo, RepoError, UpdateItemParams,
    },
    domain::entities::{ItemRecord, ItemTypeRecord},
};

use super::{PostgresRepositories, map_sqlx_error};

const SELECT_CATALOG_ITEMS: &str = r#"
    SELECT id, name, "type" AS item_type, description, icon_id, part, gender,
           power_require, is_up_to_up
    FROM item_templates
    WHERE name <> ''
    ORDER BY id ASC
"#;

const SELECT_ITEM_TYPES: &str = r#"
    SELECT id, name
    FROM item_types
    ORDER BY id ASC
"#;

const INSERT_ITEM: &str = r#"
    INSERT INTO item_templates
        (id, name, "type", description, icon_id, part, gender, power_require, is_up_to_up)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
    RETURNING id, name, "type" AS item_type, description, icon_id, part, gender,
              power_require, is_up_to_up
"#;

const UPDATE_ITEM: &str = r#"
    UPDATE item_templates
    SET name = $2,
        "type" = $3,
        description = $4,
        icon_id = $5,
        part = $6,
        gender = $7,
        power_require = $8,
        is_up_to_up = $9
    WHERE id = $1
    RETURNING id, name, "type" AS item_type, description, icon_id, part, gender,
              power_require, is_up_to_up
"#;

const DELETE_ITEM: &str = "DELETE FROM item_templates WHERE id = $1";

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: i32,
    name: String,
    item_type: i16,
    description: String,
    icon_id: i32,
    part: i32,
    gender: i16,
    power_require: i64,
    is_up_to_up: bool,
}

impl From<ItemRow> for ItemRecord {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            item_type: row.item_type,
            description: row.description,
            icon_id: row.icon_id,
            part: row.part,
            gender: row.gender,
            power_require: row.power_require,
            is_up_to_up: row.is_up_to_up,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ItemTypeRow {
    id: i16,
    name: String,
}

impl From<ItemTypeRow> for ItemTypeRecord {
    fn from(row: ItemTypeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

impl PostgresRepositories {
    /// Read-only transaction pinned to one database state, so the items and
    /// the type table of a snapshot always agree.
    async fn begin_catalog_read(&self) -> Result<Transaction<'_, Postgres>, RepoError> {
        let mut tx = self.pool().begin().await.map_err(map_sqlx_error)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        Ok(tx)
    }
}

#[async_trait]
impl CollectionSource<ItemRecord, ItemTypeRecord> for PostgresRepositories {
    async fn load_all(&self) -> Result<(Vec<ItemRecord>, Vec<ItemTypeRecord>), RepoError> {
        let mut tx = self.begin_catalog_read().await?;

        let items = sqlx::query_as::<_, ItemRow>(SELECT_CATALOG_ITEMS)
            .fetch_all(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        let types = sqlx::query_as::<_, ItemTypeRow>(SELECT_ITEM_TYPES)
            .fetch_all(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        tx.commit().await.map_err(map_sqlx_error)?;

        Ok((
            items.into_iter().map(ItemRecord::from).collect(),
            types.into_iter().map(ItemTypeRecord::from).collect(),
        ))
    }
}

#[async_trait]
impl ItemsWriteRepo for PostgresRepositories {
    async fn create_item(&self, params: CreateItemParams) -> Result<ItemRecord, RepoError> {
        let row = sqlx::query_as::<_, ItemRow>(INSERT_ITEM)
            .bind(params.id)
            .bind(params.name)
            .bind(params.item_type)
            .bind(params.description)
            .bind(params.icon_id)
            .bind(params.part)
            .bind(params.gender)
            .bind(params.power_require)
            .bind(params.is_up_to_up)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn update_item(&self, params: UpdateItemParams) -> Result<ItemRecord, RepoError> {
        let row = sqlx::query_as::<_, ItemRow>(UPDATE_ITEM)
            .bind(params.id)
            .bind(params.name)
            .bind(params.item_type)
            .bind(params.description)
            .bind(params.icon_id)
            .bind(params.part)
            .bind(params.gender)
            .bind(params.power_require)
            .bind(params.is_up_to_up)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        row.map(ItemRecord::from).ok_or(RepoError::NotFound)
    }

    async fn delete_item(&self, id: i32) -> Result<(), RepoError> {
        let result = sqlx::query(DELETE_ITEM)
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
