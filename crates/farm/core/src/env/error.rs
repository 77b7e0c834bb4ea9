//! Collaborator failures.
//!
//! Mutating collaborators report expected failure paths through
//! [`OracleError`] instead of panicking. The executor wraps them and the
//! orchestrator logs and consumes them.

use crate::error::{ErrorSeverity, FieldError};
use crate::state::{CellCoord, EntityHandle, LayerIndex, SlotIndex};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Cell is outside the field or on a layer without soil.
    #[error("no field tile at {layer}{cell}")]
    TileNotFound { layer: LayerIndex, cell: CellCoord },

    /// Cell cannot be tilled (already tilled, path, obstacle).
    #[error("tile {layer}{cell} cannot be tilled")]
    NotTillable { layer: LayerIndex, cell: CellCoord },

    /// Watering and planting require tilled soil.
    #[error("tile {layer}{cell} is not tilled")]
    NotTilled { layer: LayerIndex, cell: CellCoord },

    /// A crop already grows on this tile.
    #[error("tile {layer}{cell} is already planted")]
    AlreadyPlanted { layer: LayerIndex, cell: CellCoord },

    /// Inventory slot is empty.
    #[error("{0} is empty")]
    SlotEmpty(SlotIndex),

    /// Inventory slot holds fewer items than requested.
    #[error("{slot} holds {available}, {requested} requested")]
    InsufficientQuantity {
        slot: SlotIndex,
        available: u16,
        requested: u16,
    },

    /// Handle is stale or was never issued.
    #[error("entity {0} not found")]
    EntityNotFound(EntityHandle),

    /// Entity exists but refuses the interaction (crop not ripe).
    #[error("entity {0} rejected the interaction")]
    InteractRejected(EntityHandle),
}

impl FieldError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            TileNotFound { .. } | EntityNotFound(_) => ErrorSeverity::Validation,
            NotTillable { .. } | NotTilled { .. } | AlreadyPlanted { .. } => {
                ErrorSeverity::Validation
            }
            SlotEmpty(_) | InsufficientQuantity { .. } => ErrorSeverity::Recoverable,
            InteractRejected(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            TileNotFound { .. } => "ORACLE_TILE_NOT_FOUND",
            NotTillable { .. } => "ORACLE_NOT_TILLABLE",
            NotTilled { .. } => "ORACLE_NOT_TILLED",
            AlreadyPlanted { .. } => "ORACLE_ALREADY_PLANTED",
            SlotEmpty(_) => "ORACLE_SLOT_EMPTY",
            InsufficientQuantity { .. } => "ORACLE_INSUFFICIENT_QUANTITY",
            EntityNotFound(_) => "ORACLE_ENTITY_NOT_FOUND",
            InteractRejected(_) => "ORACLE_INTERACT_REJECTED",
        }
    }
}
