//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::ItemRecord;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Backing store for a cached collection: returns the full collection and its
/// lookup table in one call. Must be safe to call repeatedly. The returned
/// order is the order lists are served in; lookups do not rely on it.
#[async_trait]
pub trait CollectionSource<T, A>: Send + Sync {
    async fn load_all(&self) -> Result<(Vec<T>, Vec<A>), RepoError>;
}

#[derive(Debug, Clone)]
pub struct CreateItemParams {
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
pub struct UpdateItemParams {
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

#[async_trait]
pub trait ItemsWriteRepo: Send + Sync {
    async fn create_item(&self, params: CreateItemParams) -> Result<ItemRecord, RepoError>;

    /// Returns `RepoError::NotFound` when no row has `params.id`.
    async fn update_item(&self, params: UpdateItemParams) -> Result<ItemRecord, RepoError>;

    /// Returns `RepoError::NotFound` when no row has `id`.
    async fn delete_item(&self, id: i32) -> Result<(), RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn ping(&self) -> Result<(), RepoError>;
}
