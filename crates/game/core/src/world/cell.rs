use strum::Display;

use crate::progress::Village;
use crate::state::AlchemicalResource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Void,
    Plains,
    Forest,
    Mountain,
    Lake,
}

impl Terrain {
    /// Resource a production building on this terrain yields, if any.
    pub fn produces(self) -> Option<AlchemicalResource> {
        match self {
            Terrain::Mountain => Some(AlchemicalResource::Honey),
            Terrain::Lake => Some(AlchemicalResource::Waterlily),
            Terrain::Forest => Some(AlchemicalResource::Mushroom),
            Terrain::Plains | Terrain::Void => None,
        }
    }
}

/// The three sages, told apart by their roofs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SageId {
    WithChimney,
    SharpRoof,
    SmoothRoof,
}

/// Anything placed on top of terrain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorldObject {
    Village(Village),
    Market,
    Portal,
    Merchant,
    Cave,
    Sage(SageId),
    Marlon,
    ProductionBuilding { produces: AlchemicalResource },
    PreviouslyVisited { turn_number: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub terrain: Terrain,
    pub object: Option<WorldObject>,
}

impl Cell {
    pub const fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            object: None,
        }
    }

    #[must_use]
    pub fn with_object(mut self, object: WorldObject) -> Self {
        self.object = Some(object);
        self
    }

    /// A hex with no object is one the character may end a move on.
    pub fn is_free(&self) -> bool {
        self.object.is_none()
    }

    pub fn is_portal(&self) -> bool {
        matches!(self.object, Some(WorldObject::Portal))
    }
}
