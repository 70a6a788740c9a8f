//! Domain layer: catalog records and their invariants.

pub mod entities;
pub mod error;
pub mod items;
