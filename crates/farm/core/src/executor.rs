//! Domain mutation for field actions.
//!
//! The executor is the only component that changes tiles, crops or the
//! inventory. It runs after the orchestrator has confirmed range and the
//! snapshot, performs exactly one mutation per request and tells the
//! orchestrator whether to wait for an animation before moving on.
//!
//! | Kind      | Mutation                         | Completion                 |
//! |-----------|----------------------------------|----------------------------|
//! | Till      | `FieldMutator::till`             | waits for tool action done |
//! | Water     | `FieldMutator::set_watered`      | waits for tool action done |
//! | PlantSeed | `FieldMutator::plant`, then consume seed | immediate         |
//! | Harvest   | `InteractableOracle::interact`   | waits for harvest done     |

use crate::action::{ActionKind, PendingAction};
use crate::env::{AnimationKind, CompletionKind, CompletionTicket, FieldEnv, OracleError};
use crate::error::{ErrorSeverity, FieldError};
use crate::state::{CellCoord, EntityHandle, LayerIndex};

/// How the orchestrator should proceed after a successful dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Completion {
    /// Done; the next request may start this tick.
    Immediate,
    /// An animation is playing; wait for the matching completion hook.
    Await {
        kind: CompletionKind,
        ticket: CompletionTicket,
    },
}

/// Domain failures. The request is consumed regardless; nothing is retried.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("tile {layer}{cell} cannot be tilled")]
    NotTillable { layer: LayerIndex, cell: CellCoord },

    #[error("nothing can be planted on {layer}{cell}")]
    NotPlantable { layer: LayerIndex, cell: CellCoord },

    #[error("harvest target {0} no longer exists")]
    TargetGone(EntityHandle),

    #[error("harvest target {0} is not ready")]
    TargetNotReady(EntityHandle),

    #[error("{0} request carries no inventory snapshot")]
    MissingSnapshot(ActionKind),

    #[error("{0} request carries the wrong kind of target")]
    TargetMismatch(ActionKind),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl FieldError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        use ExecuteError::*;
        match self {
            NotTillable { .. } | NotPlantable { .. } | TargetGone(_) => ErrorSeverity::Validation,
            TargetNotReady(_) => ErrorSeverity::Recoverable,
            MissingSnapshot(_) | TargetMismatch(_) => ErrorSeverity::Internal,
            Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use ExecuteError::*;
        match self {
            NotTillable { .. } => "EXECUTE_NOT_TILLABLE",
            NotPlantable { .. } => "EXECUTE_NOT_PLANTABLE",
            TargetGone(_) => "EXECUTE_TARGET_GONE",
            TargetNotReady(_) => "EXECUTE_TARGET_NOT_READY",
            MissingSnapshot(_) => "EXECUTE_MISSING_SNAPSHOT",
            TargetMismatch(_) => "EXECUTE_TARGET_MISMATCH",
            Oracle(inner) => inner.error_code(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ActionExecutor {
    seeds_per_plant: u16,
}

impl ActionExecutor {
    pub fn new(seeds_per_plant: u16) -> Self {
        Self { seeds_per_plant }
    }

    /// Performs the mutation for `action`.
    ///
    /// `ticket` is handed to the animation driver for kinds that wait on an
    /// animation; the same ticket must come back through the completion hook.
    pub fn execute(
        &self,
        action: &PendingAction,
        ticket: CompletionTicket,
        env: &mut FieldEnv<'_>,
    ) -> Result<Completion, ExecuteError> {
        let request = &action.request;
        match (request.kind(), request.tile(), request.entity()) {
            (ActionKind::Till, Some((layer, cell)), _) => {
                if !env.field.can_till_at(layer, cell) {
                    return Err(ExecuteError::NotTillable { layer, cell });
                }
                env.field.till(layer, cell)?;
                Ok(play(env, AnimationKind::Till, ticket))
            }
            (ActionKind::Water, Some((layer, cell)), _) => {
                env.field.set_watered(layer, cell)?;
                Ok(play(env, AnimationKind::Water, ticket))
            }
            (ActionKind::PlantSeed, Some((layer, cell)), _) => {
                let snapshot = action
                    .snapshot
                    .ok_or(ExecuteError::MissingSnapshot(ActionKind::PlantSeed))?;
                if !env.field.can_plant_at(layer, cell) {
                    return Err(ExecuteError::NotPlantable { layer, cell });
                }
                let available = env
                    .inventory
                    .slot(snapshot.slot)
                    .ok_or(OracleError::SlotEmpty(snapshot.slot))?
                    .quantity;
                if available < self.seeds_per_plant {
                    return Err(OracleError::InsufficientQuantity {
                        slot: snapshot.slot,
                        available,
                        requested: self.seeds_per_plant,
                    }
                    .into());
                }
                // Seeds are only spent once the crop is in the ground.
                env.field.plant(layer, cell, snapshot.item)?;
                env.inventory.consume(snapshot.slot, self.seeds_per_plant)?;
                Ok(Completion::Immediate)
            }
            (ActionKind::Harvest, _, Some(handle)) => {
                if env.interactables.get(handle).is_none() {
                    return Err(ExecuteError::TargetGone(handle));
                }
                if !env.interactables.can_interact(handle) {
                    return Err(ExecuteError::TargetNotReady(handle));
                }
                env.interactables.interact(handle)?;
                Ok(play(env, AnimationKind::Harvest, ticket))
            }
            (kind, _, _) => Err(ExecuteError::TargetMismatch(kind)),
        }
    }
}

fn play(env: &mut FieldEnv<'_>, kind: AnimationKind, ticket: CompletionTicket) -> Completion {
    env.animation.play(kind, ticket);
    Completion::Await {
        kind: kind.completion(),
        ticket,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ActionRequest;
    use crate::env::{FieldMutator, InteractableOracle};
    use crate::snapshot;
    use crate::state::WorldPos;
    use crate::test_support::{MockWorld, SEED_SLOT, SEEDS};

    const TICKET: CompletionTicket = CompletionTicket(7);

    fn tile(kind: ActionKind, x: i32, y: i32) -> ActionRequest {
        let cell = CellCoord::new(x, y);
        let world = cell.center(1.0);
        match kind {
            ActionKind::Till => ActionRequest::till(LayerIndex::GROUND, cell, world),
            ActionKind::Water => ActionRequest::water(LayerIndex::GROUND, cell, world),
            ActionKind::PlantSeed => ActionRequest::plant_seed(LayerIndex::GROUND, cell, world),
            ActionKind::Harvest => unreachable!(),
        }
    }

    #[test]
    fn till_mutates_and_awaits_tool_animation() {
        let mut world = MockWorld::new();
        let action = PendingAction::new(tile(ActionKind::Till, 2, 3), None);

        let completion = ActionExecutor::new(1)
            .execute(&action, TICKET, &mut world.env())
            .unwrap();

        assert_eq!(
            completion,
            Completion::Await {
                kind: CompletionKind::ToolActionDone,
                ticket: TICKET
            }
        );
        assert!(world.field.is_tilled(LayerIndex::GROUND, CellCoord::new(2, 3)));
        assert_eq!(world.animator.played, vec![(AnimationKind::Till, TICKET)]);
    }

    #[test]
    fn till_on_blocked_cell_fails_without_animation() {
        let mut world = MockWorld::new();
        world.field.block(LayerIndex::GROUND, CellCoord::new(2, 3));
        let action = PendingAction::new(tile(ActionKind::Till, 2, 3), None);

        let err = ActionExecutor::new(1)
            .execute(&action, TICKET, &mut world.env())
            .unwrap_err();

        assert_eq!(err.error_code(), "EXECUTE_NOT_TILLABLE");
        assert!(world.animator.played.is_empty());
    }

    #[test]
    fn water_requires_tilled_soil() {
        let mut world = MockWorld::new();
        let action = PendingAction::new(tile(ActionKind::Water, 2, 3), None);

        let err = ActionExecutor::new(1)
            .execute(&action, TICKET, &mut world.env())
            .unwrap_err();
        assert!(matches!(err, ExecuteError::Oracle(OracleError::NotTilled { .. })));
        assert_eq!(err.severity(), ErrorSeverity::Validation);

        world.field.till(LayerIndex::GROUND, CellCoord::new(2, 3)).unwrap();
        ActionExecutor::new(1)
            .execute(&action, TICKET, &mut world.env())
            .unwrap();
        assert!(world.field.is_watered(LayerIndex::GROUND, CellCoord::new(2, 3)));
    }

    #[test]
    fn plant_consumes_seed_and_completes_immediately() {
        let mut world = MockWorld::new();
        world.field.till(LayerIndex::GROUND, CellCoord::new(2, 3)).unwrap();
        let snapshot = snapshot::capture(SEED_SLOT, &world.inventory);
        let action = PendingAction::new(tile(ActionKind::PlantSeed, 2, 3), snapshot);

        let completion = ActionExecutor::new(1)
            .execute(&action, TICKET, &mut world.env())
            .unwrap();

        assert_eq!(completion, Completion::Immediate);
        assert_eq!(world.field.crop_at(LayerIndex::GROUND, CellCoord::new(2, 3)), Some(SEEDS));
        assert_eq!(world.inventory.quantity(SEED_SLOT), 4);
        assert!(world.animator.played.is_empty());
    }

    #[test]
    fn plant_on_untilled_soil_keeps_seeds() {
        let mut world = MockWorld::new();
        let snapshot = snapshot::capture(SEED_SLOT, &world.inventory);
        let action = PendingAction::new(tile(ActionKind::PlantSeed, 2, 3), snapshot);

        let err = ActionExecutor::new(1)
            .execute(&action, TICKET, &mut world.env())
            .unwrap_err();

        assert!(matches!(err, ExecuteError::NotPlantable { .. }));
        assert_eq!(world.inventory.quantity(SEED_SLOT), 5);
    }

    #[test]
    fn rejected_planting_keeps_seeds() {
        let mut world = MockWorld::new();
        world.field.till(LayerIndex::GROUND, CellCoord::new(2, 3)).unwrap();
        world.field.reject_plants = true;
        let snapshot = snapshot::capture(SEED_SLOT, &world.inventory);
        let action = PendingAction::new(tile(ActionKind::PlantSeed, 2, 3), snapshot);

        let err = ActionExecutor::new(1)
            .execute(&action, TICKET, &mut world.env())
            .unwrap_err();

        assert!(matches!(err, ExecuteError::Oracle(OracleError::AlreadyPlanted { .. })));
        assert_eq!(world.inventory.quantity(SEED_SLOT), 5);
        assert_eq!(world.field.crop_at(LayerIndex::GROUND, CellCoord::new(2, 3)), None);
    }

    #[test]
    fn plant_without_enough_seeds_leaves_soil_empty() {
        let mut world = MockWorld::new();
        world.field.till(LayerIndex::GROUND, CellCoord::new(2, 3)).unwrap();
        let snapshot = snapshot::capture(SEED_SLOT, &world.inventory);
        let action = PendingAction::new(tile(ActionKind::PlantSeed, 2, 3), snapshot);

        let err = ActionExecutor::new(6)
            .execute(&action, TICKET, &mut world.env())
            .unwrap_err();

        assert!(matches!(
            err,
            ExecuteError::Oracle(OracleError::InsufficientQuantity { available: 5, .. })
        ));
        assert_eq!(world.field.crop_at(LayerIndex::GROUND, CellCoord::new(2, 3)), None);
        assert_eq!(world.inventory.quantity(SEED_SLOT), 5);
    }

    #[test]
    fn harvest_of_removed_entity_reports_target_gone() {
        let mut world = MockWorld::new();
        let crop = world.spawn_crop(LayerIndex::GROUND, CellCoord::new(1, 1), true);
        world.entities.remove(crop);
        let action = PendingAction::new(ActionRequest::harvest(crop, WorldPos::ORIGIN), None);

        let err = ActionExecutor::new(1)
            .execute(&action, TICKET, &mut world.env())
            .unwrap_err();

        assert_eq!(err, ExecuteError::TargetGone(crop));
    }

    #[test]
    fn harvest_awaits_harvest_animation() {
        let mut world = MockWorld::new();
        let crop = world.spawn_crop(LayerIndex::GROUND, CellCoord::new(1, 1), true);
        let action = PendingAction::new(ActionRequest::harvest(crop, WorldPos::ORIGIN), None);

        let completion = ActionExecutor::new(1)
            .execute(&action, TICKET, &mut world.env())
            .unwrap();

        assert_eq!(
            completion,
            Completion::Await {
                kind: CompletionKind::HarvestDone,
                ticket: TICKET
            }
        );
        assert_eq!(world.entities.harvested, vec![crop]);
        assert!(world.entities.get(crop).is_none());
    }
}
