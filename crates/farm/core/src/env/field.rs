use super::OracleError;
use crate::state::{CellCoord, ItemId, LayerIndex};

/// Tile and crop mutations.
///
/// Queries are side-effect free. Mutations are idempotent per target and
/// report expected failures as [`OracleError`].
pub trait FieldMutator {
    fn can_till_at(&self, layer: LayerIndex, cell: CellCoord) -> bool;

    /// Turns the cell into tilled soil.
    fn till(&mut self, layer: LayerIndex, cell: CellCoord) -> Result<(), OracleError>;

    fn set_watered(&mut self, layer: LayerIndex, cell: CellCoord) -> Result<(), OracleError>;

    fn can_plant_at(&self, layer: LayerIndex, cell: CellCoord) -> bool;

    /// Creates a crop from `seed` on tilled soil.
    fn plant(&mut self, layer: LayerIndex, cell: CellCoord, seed: ItemId)
    -> Result<(), OracleError>;
}
