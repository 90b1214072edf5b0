use bitflags::bitflags;

use crate::action::ActionError;
use crate::config::GameConfig;
use crate::world::{Cell, Terrain, WorldObject};

use super::inventory::Inventory;
use super::items::{Artifact, Skill};

bitflags! {
    /// Learned skills. Set semantics: learning twice is a no-op.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Skills: u8 {
        const HEFTY_POCKETS = 1 << 0;
        const NEGOTIATION = 1 << 1;
        const WOODLAND_EXPLORER = 1 << 2;
        const SWIFT_BOOTS = 1 << 3;
        const SPELUNKING = 1 << 4;
        const MOUNTAINEERING = 1 << 5;
    }
}

bitflags! {
    /// Artifacts found in caves.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Artifacts: u8 {
        const GOLDEN_DIE = 1 << 0;
        const LEATHER_BACKPACK = 1 << 1;
        const PORTAL_STONE = 1 << 2;
    }
}

impl From<Skill> for Skills {
    fn from(skill: Skill) -> Self {
        match skill {
            Skill::HeftyPockets => Skills::HEFTY_POCKETS,
            Skill::Negotiation => Skills::NEGOTIATION,
            Skill::WoodlandExplorer => Skills::WOODLAND_EXPLORER,
            Skill::SwiftBoots => Skills::SWIFT_BOOTS,
            Skill::Spelunking => Skills::SPELUNKING,
            Skill::Mountaineering => Skills::MOUNTAINEERING,
        }
    }
}

impl From<Artifact> for Artifacts {
    fn from(artifact: Artifact) -> Self {
        match artifact {
            Artifact::GoldenDie => Artifacts::GOLDEN_DIE,
            Artifact::LeatherBackpack => Artifacts::LEATHER_BACKPACK,
            Artifact::PortalStone => Artifacts::PORTAL_STONE,
        }
    }
}

/// The player's avatar: holdings plus the skills and artifacts that shape
/// capacity and movement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub inventory: Inventory,
    pub skills: Skills,
    pub artifacts: Artifacts,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            inventory: Inventory::initial(),
            skills: Skills::empty(),
            artifacts: Artifacts::empty(),
        }
    }
}

impl Character {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_inventory(&self, inventory: Inventory) -> Self {
        Self {
            inventory,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_skill(&self, skill: Skill) -> Self {
        Self {
            skills: self.skills | Skills::from(skill),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_artifact(&self, artifact: Artifact) -> Self {
        Self {
            artifacts: self.artifacts | Artifacts::from(artifact),
            ..self.clone()
        }
    }

    pub fn has_skill(&self, skill: Skill) -> bool {
        self.skills.contains(skill.into())
    }

    pub fn has_artifact(&self, artifact: Artifact) -> bool {
        self.artifacts.contains(artifact.into())
    }

    pub fn artifact_count(&self) -> usize {
        self.artifacts.iter().count()
    }

    pub fn storage_capacity(&self) -> u32 {
        GameConfig::BASE_STORAGE_CAPACITY
            + u32::from(self.has_skill(Skill::HeftyPockets))
            + u32::from(self.has_artifact(Artifact::LeatherBackpack))
    }

    pub fn movement_speed(&self) -> u32 {
        GameConfig::BASE_MOVEMENT_SPEED + u32::from(self.has_skill(Skill::SwiftBoots))
    }

    /// Whether the character may pass through `cell` while moving.
    ///
    /// Decorated hexes block passage except for previously visited ones.
    pub fn can_traverse(&self, cell: &Cell) -> bool {
        if let Some(object) = &cell.object {
            return matches!(object, WorldObject::PreviouslyVisited { .. });
        }
        match cell.terrain {
            Terrain::Plains => true,
            Terrain::Forest => self.has_skill(Skill::WoodlandExplorer),
            Terrain::Mountain => self.has_skill(Skill::Mountaineering),
            Terrain::Lake | Terrain::Void => false,
        }
    }

    /// Adds `items`; anything above capacity is discarded.
    #[must_use]
    pub fn gain_items(&self, items: &Inventory) -> Self {
        let inventory = self
            .inventory
            .add(items)
            .limit(self.storage_capacity());
        self.with_inventory(inventory)
    }

    /// Pays `cost` then receives `gain` (capped), or fails as a whole.
    pub fn trade_items(&self, cost: &Inventory, gain: &Inventory) -> Result<Self, ActionError> {
        let after_cost = self
            .inventory
            .subtract(cost)
            .ok_or(ActionError::InsufficientResources)?;
        let inventory = after_cost.add(gain).limit(self.storage_capacity());
        Ok(self.with_inventory(inventory))
    }

    /// True when the inventory respects every capacity rule.
    pub fn is_within_capacity(&self) -> bool {
        self.inventory.within_bounds(self.storage_capacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::items::{AlchemicalResource, Dialect};

    #[test]
    fn capacity_and_speed_follow_skills_and_artifacts() {
        let base = Character::new();
        assert_eq!(base.storage_capacity(), 2);
        assert_eq!(base.movement_speed(), 2);

        let upgraded = base
            .with_skill(Skill::HeftyPockets)
            .with_artifact(Artifact::LeatherBackpack)
            .with_skill(Skill::SwiftBoots);
        assert_eq!(upgraded.storage_capacity(), 4);
        assert_eq!(upgraded.movement_speed(), 3);
    }

    #[test]
    fn learning_twice_keeps_set_semantics() {
        let once = Character::new().with_skill(Skill::Negotiation);
        let twice = once.with_skill(Skill::Negotiation);
        assert_eq!(once, twice);
        assert_eq!(twice.skills.iter().count(), 1);
    }

    #[test]
    fn gain_items_discards_overflow() {
        let character = Character::new()
            .gain_items(&Inventory::empty().with_alchemy(AlchemicalResource::Honey, 10));
        assert_eq!(character.inventory.alchemy.get(AlchemicalResource::Honey), 2);
        assert!(character.is_within_capacity());
    }

    #[test]
    fn failed_trade_leaves_character_untouched() {
        let character = Character::new();
        let cost = Inventory::empty().with_raw_pages(Dialect::Fish, 1);
        let gain = Inventory::empty().with_raw_pages(Dialect::Bird, 1);
        assert_eq!(
            character.trade_items(&cost, &gain),
            Err(ActionError::InsufficientResources)
        );
        assert_eq!(character.inventory, Inventory::initial());
    }

    #[test]
    fn trade_applies_cost_and_capped_gain() {
        let character = Character::new();
        let traded = character
            .trade_items(
                &Inventory::empty().with_rubies(1),
                &Inventory::empty().with_alchemy(AlchemicalResource::Mushroom, 5),
            )
            .unwrap();
        assert_eq!(traded.inventory.rubies, 1);
        assert_eq!(traded.inventory.alchemy.get(AlchemicalResource::Mushroom), 2);
    }

    #[test]
    fn traversal_rules() {
        let plain = Cell::new(Terrain::Plains);
        let forest = Cell::new(Terrain::Forest);
        let visited = Cell::new(Terrain::Lake).with_object(WorldObject::PreviouslyVisited {
            turn_number: 3,
        });
        let market = Cell::new(Terrain::Plains).with_object(WorldObject::Market);

        let character = Character::new();
        assert!(character.can_traverse(&plain));
        assert!(!character.can_traverse(&forest));
        assert!(character.can_traverse(&visited));
        assert!(!character.can_traverse(&market));
        assert!(!character.can_traverse(&Cell::new(Terrain::Void)));

        let explorer = character.with_skill(Skill::WoodlandExplorer);
        assert!(explorer.can_traverse(&forest));
        assert!(!explorer.can_traverse(&Cell::new(Terrain::Mountain)));
    }
}
