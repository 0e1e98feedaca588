//! Error types for the `autoshaker-world` crate.
//!
//! All fallible operations on [`GridWorld`](crate::grid::GridWorld) return
//! [`WorldError`].

use autoshaker_types::{EntityId, TilePoint};

/// Errors that can occur while building or mutating the reference world.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A terrain feature is already rooted on the tile.
    #[error("tile {0} already holds a terrain feature")]
    TileOccupied(TilePoint),

    /// A container is already placed on the tile.
    #[error("tile {0} already holds a container")]
    ContainerOccupied(TilePoint),

    /// The entity identity is already registered in the world.
    #[error("duplicate entity id: {0}")]
    DuplicateEntity(EntityId),

    /// No entity with this identity exists in the world.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// The interaction's category does not match the stored entity.
    #[error("entity {0} is not of the requested category")]
    CategoryMismatch(EntityId),
}
