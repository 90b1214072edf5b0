use async_trait::async_trait;

use crate::config::GameConfig;
use crate::engine::BootstrappedGame;
use crate::state::{AlchemicalResource, GameState, Inventory};
use crate::world::{Position, WorldObject};

use super::{
    ActionError, ActionTransition, CaveAction, MarketAction, MarlonAction, MerchantAction,
    PortalAction, SageAction, VillageAction,
};

/// Acts on an adjacent hex; what happens depends on what the hex holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InteractAction {
    pub target: Position,
}

impl InteractAction {
    pub fn new(target: Position) -> Self {
        Self { target }
    }

    fn resolve(&self, state: &GameState) -> Result<Interaction, ActionError> {
        if !state.char_pos.is_adjacent(self.target) {
            return Err(ActionError::Unreachable);
        }
        Interaction::resolve(state, self.target)
    }
}

#[async_trait]
impl ActionTransition for InteractAction {
    fn pre_validate(&self, game: &BootstrappedGame) -> Result<(), ActionError> {
        self.resolve(&game.state)?.pre_validate(game)
    }

    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError> {
        self.resolve(&game.state)?.apply(game).await
    }
}

/// The concrete transition an interaction dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interaction {
    Build(BuildAction),
    Produce(ProduceAction),
    Cave(CaveAction),
    Portal(PortalAction),
    Market(MarketAction),
    Marlon(MarlonAction),
    Merchant(MerchantAction),
    Sage(SageAction),
    Village(VillageAction),
}

impl Interaction {
    /// Picks the transition for the hex at `target`.
    pub fn resolve(state: &GameState, target: Position) -> Result<Self, ActionError> {
        let cell = state.cell(target).ok_or(ActionError::Unreachable)?;
        let interaction = match &cell.object {
            None => {
                let produces = cell.terrain.produces().ok_or(ActionError::NothingToDo)?;
                Interaction::Build(BuildAction { target, produces })
            }
            Some(WorldObject::ProductionBuilding { produces }) => {
                Interaction::Produce(ProduceAction {
                    produces: *produces,
                })
            }
            Some(WorldObject::Cave) => Interaction::Cave(CaveAction { target }),
            Some(WorldObject::Portal) => Interaction::Portal(PortalAction { target }),
            Some(WorldObject::Market) => Interaction::Market(MarketAction),
            Some(WorldObject::Marlon) => Interaction::Marlon(MarlonAction),
            Some(WorldObject::Merchant) => Interaction::Merchant(MerchantAction),
            Some(WorldObject::Sage(sage)) => Interaction::Sage(SageAction { sage: *sage }),
            Some(WorldObject::Village(_)) => Interaction::Village(VillageAction { target }),
            Some(WorldObject::PreviouslyVisited { .. }) => return Err(ActionError::NothingToDo),
        };
        Ok(interaction)
    }

    fn transition(&self) -> &dyn ActionTransition {
        match self {
            Interaction::Build(action) => action,
            Interaction::Produce(action) => action,
            Interaction::Cave(action) => action,
            Interaction::Portal(action) => action,
            Interaction::Market(action) => action,
            Interaction::Marlon(action) => action,
            Interaction::Merchant(action) => action,
            Interaction::Sage(action) => action,
            Interaction::Village(action) => action,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Build(_) => "build",
            Interaction::Produce(_) => "produce",
            Interaction::Cave(_) => "cave",
            Interaction::Portal(_) => "portal",
            Interaction::Market(_) => "market",
            Interaction::Marlon(_) => "marlon",
            Interaction::Merchant(_) => "merchant",
            Interaction::Sage(_) => "sage",
            Interaction::Village(_) => "village",
        }
    }
}

#[async_trait]
impl ActionTransition for Interaction {
    fn pre_validate(&self, game: &BootstrappedGame) -> Result<(), ActionError> {
        self.transition().pre_validate(game)
    }

    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError> {
        self.transition().apply(game).await
    }
}

/// Puts a production building on bare Mountain, Lake, or Forest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildAction {
    pub target: Position,
    pub produces: AlchemicalResource,
}

impl BuildAction {
    fn cost() -> Inventory {
        Inventory::empty().with_rubies(GameConfig::BUILD_COST_RUBIES)
    }
}

#[async_trait]
impl ActionTransition for BuildAction {
    fn pre_validate(&self, game: &BootstrappedGame) -> Result<(), ActionError> {
        if !Self::cost().is_affordable_from(&game.state.character.inventory) {
            return Err(ActionError::InsufficientResources);
        }
        Ok(())
    }

    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError> {
        let state = &game.state;
        let cell = state.cell(self.target).ok_or(ActionError::Unreachable)?;
        let building = cell.clone().with_object(WorldObject::ProductionBuilding {
            produces: self.produces,
        });
        let character = state
            .character
            .trade_items(&Self::cost(), &Inventory::empty())?;

        let mut next = state.with_character(character);
        next.world.set(self.target, building)?;
        Ok(next)
    }
}

/// Collects a building's yield; anything over capacity is lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProduceAction {
    pub produces: AlchemicalResource,
}

#[async_trait]
impl ActionTransition for ProduceAction {
    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError> {
        let gain = Inventory::empty().with_alchemy(self.produces, GameConfig::PRODUCTION_YIELD);
        Ok(game
            .state
            .with_character(game.state.character.gain_items(&gain)))
    }
}
