//! Prompt vocabulary: what is being asked, under which key, and the values a
//! controller can pick from or be shown.

use std::fmt;

use crate::action::{CaveWay, GameAction, MarketTrade, MarketTradeType, MarlonInteraction};
use crate::progress::{LostPage, Recipe};
use crate::state::{AlchemicalResource, Artifact, Dialect, GameState, Inventory, Skill};
use crate::world::Position;

/// Unique key of one prompt occurrence.
///
/// Keys nest: `PromptKey::root(7).sub(2)` renders as `[7,2]` and
/// `.sub(0)` on that renders as `[[7,2],0]`. The RNG derives its draw from
/// the key, so equal keys replay equal draws.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PromptKey(String);

impl PromptKey {
    pub fn root(prompt_number: u64) -> Self {
        Self(prompt_number.to_string())
    }

    pub fn pair(prompt_number: u64, sub: u32) -> Self {
        Self(format!("[{prompt_number},{sub}]"))
    }

    #[must_use]
    pub fn sub(&self, sub: u32) -> Self {
        Self(format!("[{},{sub}]", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Random draws the rules perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RngContext {
    RecipeDialect,
    RecipeIngredients,
    RecipeIngredientCount,
    CaveBarrel1,
    CaveBarrel2,
    CaveTreasure,
    VillageRevealPage,
    VillageNextPage,
}

/// Decisions the controller makes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QuestionContext {
    StartPosition,
    HoneyBuilding,
    WaterlilyBuilding,
    MushroomBuilding,
    ChooseAction,
    CaveWhichWay,
    CaveExit,
    PortalDestination,
    MarketTradeType,
    MarketTrade,
    MarlonInteraction,
    MarlonRevealDialectRecipe,
    MarlonRevealIngredientsRecipe,
    MarlonGiveIngredientsRecipe,
    MarlonIngredientAmount(AlchemicalResource),
    MerchantTradeWhat,
    MerchantTradeFor,
    SageTranslateWhat,
    SageLearnWhat,
    /// Offered while the Golden Die is held: keep `candidate` or draw again.
    KeepOrReroll { draw: RngContext, candidate: u32 },
}

/// Fire-and-forget notifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShowContext {
    GameState,
    /// Outcome of a random draw made under the given context.
    Revealed(RngContext),
    /// Replacement value drawn after the controller chose to reroll.
    Rerolled(RngContext),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PromptContext {
    Rng(RngContext),
    Question(QuestionContext),
    Show(ShowContext),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prompt {
    pub context: PromptContext,
    pub key: PromptKey,
}

impl Prompt {
    pub fn new(context: PromptContext, key: PromptKey) -> Self {
        Self { context, key }
    }

    pub fn rng(context: RngContext, key: PromptKey) -> Self {
        Self::new(PromptContext::Rng(context), key)
    }

    pub fn question(context: QuestionContext, key: PromptKey) -> Self {
        Self::new(PromptContext::Question(context), key)
    }

    pub fn show(context: ShowContext, key: PromptKey) -> Self {
        Self::new(PromptContext::Show(context), key)
    }

    /// Same context under a derived key.
    #[must_use]
    pub fn sub(&self, sub: u32) -> Self {
        Self::new(self.context.clone(), self.key.sub(sub))
    }
}

/// Answer to a keep-or-reroll question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RerollDecision {
    Keep,
    Reroll,
}

impl RerollDecision {
    pub const ALL: [RerollDecision; 2] = [RerollDecision::Keep, RerollDecision::Reroll];
}

/// One option in a list the controller (or RNG) picks from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Choice {
    Position(Position),
    Action(GameAction),
    Decision(RerollDecision),
    CaveWay(CaveWay),
    Loot(Inventory),
    Artifact(Artifact),
    Dialect(Dialect),
    /// `None` declines to learn.
    Skill(Option<Skill>),
    /// `None` leaves the market.
    TradeType(Option<MarketTradeType>),
    Trade(MarketTrade),
    /// `None` leaves Marlon.
    Marlon(Option<MarlonInteraction>),
    Recipe(usize),
}

macro_rules! impl_choice_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Choice {
                fn from(value: $ty) -> Self {
                    Choice::$variant(value)
                }
            }
        )*
    };
}

impl_choice_from! {
    Position => Position,
    GameAction => Action,
    RerollDecision => Decision,
    CaveWay => CaveWay,
    Inventory => Loot,
    Artifact => Artifact,
    Dialect => Dialect,
    Option<Skill> => Skill,
    Option<MarketTradeType> => TradeType,
    MarketTrade => Trade,
    Option<MarlonInteraction> => Marlon,
    usize => Recipe,
}

/// Values pushed to the controller through `show`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shown {
    GameState(Box<GameState>),
    Loot(Inventory),
    Artifact(Artifact),
    LostPage(LostPage),
    Recipe(Recipe),
    Number(u32),
}
