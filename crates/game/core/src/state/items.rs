use strum::{Display, EnumIter};

/// Resources produced by buildings and consumed by pages and recipes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlchemicalResource {
    Mushroom,
    Honey,
    Waterlily,
}

/// Language a lost page is written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dialect {
    Bird,
    Dragonfly,
    Fish,
    Mouse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Skill {
    HeftyPockets,
    Negotiation,
    WoodlandExplorer,
    SwiftBoots,
    Spelunking,
    Mountaineering,
}

/// Cave treasures. Each can be held at most once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Artifact {
    GoldenDie,
    LeatherBackpack,
    PortalStone,
}
