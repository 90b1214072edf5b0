/// Rule constants shared by the character, generators, and action resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig;

impl GameConfig {
    // ===== character =====
    /// Rubies and each alchemical resource are capped at this before bonuses.
    pub const BASE_STORAGE_CAPACITY: u32 = 2;
    /// Every raw/translated page counter is capped here regardless of bonuses.
    pub const PAGE_CAPACITY: u32 = 4;
    pub const BASE_MOVEMENT_SPEED: u32 = 2;
    pub const INITIAL_RUBIES: u32 = 2;

    // ===== interactions =====
    pub const PRODUCTION_YIELD: u32 = 10;
    pub const BUILD_COST_RUBIES: u32 = 1;
    pub const CAVE_EXTRA_TURNS: u64 = 3;
    pub const TRANSLATION_COST_RUBIES: u32 = 1;
    pub const SKILL_COST_RUBIES: u32 = 1;
    pub const MAX_ARTIFACTS: usize = 3;

    // ===== generators =====
    /// Upper bound (inclusive) of the lost-page wheel shift.
    pub const LOST_PAGE_MAX_SHIFT: u32 = 5;
    pub const VILLAGE_MAX_SLOTS: usize = 2;
    pub const RECIPE_COUNT: usize = 3;

    /// `(num_pages, rubies_cost)` for each recipe slot at game start.
    pub const INITIAL_RECIPES: [(u32, u32); Self::RECIPE_COUNT] = [(4, 1), (3, 2), (2, 3)];

    /// Prompt number of the first action prompt after the start-up questions.
    pub const FIRST_PROMPT_NUMBER: u64 = 1;
}
