//! Farmable tile grid.

use std::collections::BTreeMap;

use farm_core::{CellCoord, FieldMutator, ItemId, LayerIndex, OracleError};
use serde::Serialize;

/// Soil state of one farmable cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SoilTile {
    pub tilled: bool,
    pub watered: bool,
    pub crop: Option<ItemId>,
    /// Paths, rocks and other cells a hoe cannot break.
    pub blocked: bool,
}

/// Farmable cells per layer. Cells outside the grid are not field tiles.
#[derive(Clone, Debug, Default)]
pub struct TileGrid {
    tiles: BTreeMap<(LayerIndex, CellCoord), SoilTile>,
}

impl TileGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the rectangle `min..=max` of untilled soil on `layer`.
    pub fn add_patch(&mut self, layer: LayerIndex, min: CellCoord, max: CellCoord) {
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                self.tiles.entry((layer, CellCoord::new(x, y))).or_default();
            }
        }
    }

    pub fn block(&mut self, layer: LayerIndex, cell: CellCoord) {
        self.tiles.entry((layer, cell)).or_default().blocked = true;
    }

    pub fn get(&self, layer: LayerIndex, cell: CellCoord) -> Option<&SoilTile> {
        self.tiles.get(&(layer, cell))
    }

    pub fn contains(&self, layer: LayerIndex, cell: CellCoord) -> bool {
        self.tiles.contains_key(&(layer, cell))
    }

    pub fn is_tilled(&self, layer: LayerIndex, cell: CellCoord) -> bool {
        self.get(layer, cell).is_some_and(|tile| tile.tilled)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LayerIndex, CellCoord, &SoilTile)> {
        self.tiles
            .iter()
            .map(|((layer, cell), tile)| (*layer, *cell, tile))
    }

    fn tile_mut(&mut self, layer: LayerIndex, cell: CellCoord) -> Result<&mut SoilTile, OracleError> {
        self.tiles
            .get_mut(&(layer, cell))
            .ok_or(OracleError::TileNotFound { layer, cell })
    }
}

impl FieldMutator for TileGrid {
    fn can_till_at(&self, layer: LayerIndex, cell: CellCoord) -> bool {
        self.get(layer, cell)
            .is_some_and(|tile| !tile.blocked && !tile.tilled)
    }

    fn till(&mut self, layer: LayerIndex, cell: CellCoord) -> Result<(), OracleError> {
        let tile = self.tile_mut(layer, cell)?;
        if tile.blocked {
            return Err(OracleError::NotTillable { layer, cell });
        }
        tile.tilled = true;
        Ok(())
    }

    fn set_watered(&mut self, layer: LayerIndex, cell: CellCoord) -> Result<(), OracleError> {
        let tile = self.tile_mut(layer, cell)?;
        if !tile.tilled {
            return Err(OracleError::NotTilled { layer, cell });
        }
        tile.watered = true;
        Ok(())
    }

    fn can_plant_at(&self, layer: LayerIndex, cell: CellCoord) -> bool {
        self.get(layer, cell)
            .is_some_and(|tile| tile.tilled && tile.crop.is_none())
    }

    fn plant(&mut self, layer: LayerIndex, cell: CellCoord, seed: ItemId) -> Result<(), OracleError> {
        let tile = self.tile_mut(layer, cell)?;
        if !tile.tilled {
            return Err(OracleError::NotTilled { layer, cell });
        }
        if tile.crop.is_some() {
            return Err(OracleError::AlreadyPlanted { layer, cell });
        }
        tile.crop = Some(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUND: LayerIndex = LayerIndex::GROUND;

    fn grid() -> TileGrid {
        let mut grid = TileGrid::new();
        grid.add_patch(GROUND, CellCoord::new(0, 0), CellCoord::new(3, 3));
        grid
    }

    #[test]
    fn only_patch_cells_are_field_tiles() {
        let mut grid = grid();
        assert!(grid.can_till_at(GROUND, CellCoord::new(3, 3)));
        assert!(!grid.can_till_at(GROUND, CellCoord::new(4, 0)));
        assert!(!grid.can_till_at(LayerIndex(1), CellCoord::new(0, 0)));
        assert_eq!(
            grid.till(GROUND, CellCoord::new(4, 0)),
            Err(OracleError::TileNotFound {
                layer: GROUND,
                cell: CellCoord::new(4, 0)
            })
        );
    }

    #[test]
    fn soil_progresses_from_tilled_to_planted() {
        let mut grid = grid();
        let cell = CellCoord::new(1, 1);

        assert!(grid.set_watered(GROUND, cell).is_err());
        assert!(!grid.can_plant_at(GROUND, cell));

        grid.till(GROUND, cell).unwrap();
        assert!(!grid.can_till_at(GROUND, cell));
        grid.set_watered(GROUND, cell).unwrap();
        grid.plant(GROUND, cell, ItemId(10)).unwrap();

        let tile = grid.get(GROUND, cell).unwrap();
        assert!(tile.tilled && tile.watered);
        assert_eq!(tile.crop, Some(ItemId(10)));
        assert!(matches!(
            grid.plant(GROUND, cell, ItemId(10)),
            Err(OracleError::AlreadyPlanted { .. })
        ));
    }

    #[test]
    fn blocked_cells_refuse_the_hoe() {
        let mut grid = grid();
        grid.block(GROUND, CellCoord::new(2, 2));

        assert!(!grid.can_till_at(GROUND, CellCoord::new(2, 2)));
        assert!(matches!(
            grid.till(GROUND, CellCoord::new(2, 2)),
            Err(OracleError::NotTillable { .. })
        ));
    }
}
