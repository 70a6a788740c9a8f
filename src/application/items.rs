use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::application::catalog::{CatalogFilter, CatalogView, build_view};
use crate::application::pagination::PageRequest;
use crate::application::repos::{CreateItemParams, ItemsWriteRepo, RepoError, UpdateItemParams};
use crate::cache::CollectionCache;
use crate::domain::entities::{ItemRecord, ItemTypeRecord};
use crate::domain::error::DomainError;
use crate::domain::items::{ensure_item_id, ensure_power_require, normalize_item_name};

pub type ItemCatalogCache = CollectionCache<ItemRecord, ItemTypeRecord>;
pub type ItemCatalogView = CatalogView<ItemRecord, ItemTypeRecord>;

/// Name under which the item catalog reports cache metrics and logs.
pub const ITEM_CATALOG: &str = "items";

#[derive(Debug, Error)]
pub enum AdminItemError {
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error("item not found")]
    NotFound,
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, Default)]
pub struct ItemListQuery {
    pub filter: CatalogFilter,
    pub page: PageRequest,
    pub refresh: bool,
}

#[derive(Debug, Clone)]
pub struct CreateItemCommand {
    pub id: i32,
    pub name: String,
    pub item_type: i16,
    pub description: String,
    pub icon_id: i32,
    pub part: i32,
    pub gender: i16,
    pub power_require: i64,
    pub is_up_to_up: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateItemCommand {
    pub id: i32,
    pub name: String,
    pub item_type: i16,
    pub description: String,
    pub icon_id: i32,
    pub part: i32,
    pub gender: i16,
    pub power_require: i64,
    pub is_up_to_up: bool,
}

/// Item catalog reads (served from the snapshot cache) and writes (persisted,
/// then followed by cache invalidation).
#[derive(Clone)]
pub struct AdminItemService {
    cache: Arc<ItemCatalogCache>,
    writer: Arc<dyn ItemsWriteRepo>,
}

impl AdminItemService {
    pub fn new(cache: Arc<ItemCatalogCache>, writer: Arc<dyn ItemsWriteRepo>) -> Self {
        Self { cache, writer }
    }

    pub fn cache(&self) -> &Arc<ItemCatalogCache> {
        &self.cache
    }

    pub async fn list(&self, query: &ItemListQuery) -> Result<ItemCatalogView, AdminItemError> {
        let snapshot = self.cache.get_snapshot(query.refresh).await?;
        Ok(build_view(&snapshot, &query.filter, query.page))
    }

    pub async fn find(&self, id: i32) -> Result<Option<ItemRecord>, AdminItemError> {
        let snapshot = self.cache.get_snapshot(false).await?;
        let found = snapshot.items().iter().find(|item| item.id == id).cloned();
        Ok(found)
    }

    pub async fn item_types(&self, refresh: bool) -> Result<Vec<ItemTypeRecord>, AdminItemError> {
        let snapshot = self.cache.get_snapshot(refresh).await?;
        Ok(snapshot.auxiliary().to_vec())
    }

    /// Load the catalog ahead of the first request. Failures are logged and
    /// left for the first read to retry.
    pub async fn warm(&self) {
        match self.cache.get_snapshot(false).await {
            Ok(snapshot) => info!(
                target: "realm_admin::items",
                items = snapshot.len(),
                item_types = snapshot.auxiliary().len(),
                "item catalog warmed"
            ),
            Err(err) => warn!(
                target: "realm_admin::items",
                error = %err,
                "item catalog warmup failed"
            ),
        }
    }

    pub async fn create_item(
        &self,
        command: CreateItemCommand,
    ) -> Result<ItemRecord, AdminItemError> {
        let params = CreateItemParams {
            id: ensure_item_id(command.id)?,
            name: normalize_item_name(&command.name)?,
            item_type: command.item_type,
            description: command.description.trim().to_string(),
            icon_id: command.icon_id,
            part: command.part,
            gender: command.gender,
            power_require: ensure_power_require(command.power_require)?,
            is_up_to_up: command.is_up_to_up,
        };

        let item = self.writer.create_item(params).await?;
        self.cache.invalidate();

        info!(
            target: "realm_admin::items",
            item_id = item.id,
            item_type = item.item_type,
            name = %item.name,
            "item created"
        );
        Ok(item)
    }

    pub async fn update_item(
        &self,
        command: UpdateItemCommand,
    ) -> Result<ItemRecord, AdminItemError> {
        let params = UpdateItemParams {
            id: ensure_item_id(command.id)?,
            name: normalize_item_name(&command.name)?,
            item_type: command.item_type,
            description: command.description.trim().to_string(),
            icon_id: command.icon_id,
            part: command.part,
            gender: command.gender,
            power_require: ensure_power_require(command.power_require)?,
            is_up_to_up: command.is_up_to_up,
        };

        let item = self.writer.update_item(params).await.map_err(not_found)?;
        self.cache.invalidate();

        info!(
            target: "realm_admin::items",
            item_id = item.id,
            "item updated"
        );
        Ok(item)
    }

    pub async fn delete_item(&self, id: i32) -> Result<(), AdminItemError> {
        let id = ensure_item_id(id)?;
        self.writer.delete_item(id).await.map_err(not_found)?;
        self.cache.invalidate();

        info!(target: "realm_admin::items", item_id = id, "item deleted");
        Ok(())
    }
}

fn not_found(err: RepoError) -> AdminItemError {
    match err {
        RepoError::NotFound => AdminItemError::NotFound,
        other => AdminItemError::Repo(other),
    }
}
