//! The fixed map every game is played on.

use crate::progress::Village;

use super::cell::{Cell, SageId, Terrain, WorldObject};
use super::grid::{World, WorldRow};

/// One character of the map encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateTile {
    PlainsVillage,
    ForestVillage,
    Market,
    Portal,
    Merchant,
    Cave,
    SageWithChimney,
    SageWithSharpRoof,
    SageWithSmoothRoof,
    Marlon,
    Forest,
    Mountain,
    Lake,
    Plains,
    Start,
    Void,
}

impl TemplateTile {
    /// Decodes one map character; unknown characters are void.
    pub fn from_char(ch: char) -> Self {
        match ch {
            'V' => Self::PlainsVillage,
            'v' => Self::ForestVillage,
            'm' => Self::Market,
            'p' => Self::Portal,
            'M' => Self::Merchant,
            'c' => Self::Cave,
            '1' => Self::SageWithChimney,
            '2' => Self::SageWithSharpRoof,
            '3' => Self::SageWithSmoothRoof,
            't' => Self::Marlon,
            'f' => Self::Forest,
            '^' => Self::Mountain,
            'l' => Self::Lake,
            ' ' => Self::Plains,
            '0' => Self::Start,
            _ => Self::Void,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Self::PlainsVillage => {
                Cell::new(Terrain::Plains).with_object(WorldObject::Village(Village::new()))
            }
            Self::ForestVillage => {
                Cell::new(Terrain::Forest).with_object(WorldObject::Village(Village::new()))
            }
            Self::Market => Cell::new(Terrain::Plains).with_object(WorldObject::Market),
            Self::Portal => Cell::new(Terrain::Plains).with_object(WorldObject::Portal),
            Self::Merchant => Cell::new(Terrain::Plains).with_object(WorldObject::Merchant),
            Self::Cave => Cell::new(Terrain::Mountain).with_object(WorldObject::Cave),
            Self::SageWithChimney => {
                Cell::new(Terrain::Plains).with_object(WorldObject::Sage(SageId::WithChimney))
            }
            Self::SageWithSharpRoof => {
                Cell::new(Terrain::Plains).with_object(WorldObject::Sage(SageId::SharpRoof))
            }
            Self::SageWithSmoothRoof => {
                Cell::new(Terrain::Plains).with_object(WorldObject::Sage(SageId::SmoothRoof))
            }
            Self::Marlon => Cell::new(Terrain::Plains).with_object(WorldObject::Marlon),
            Self::Forest => Cell::new(Terrain::Forest),
            Self::Mountain => Cell::new(Terrain::Mountain),
            Self::Lake => Cell::new(Terrain::Lake),
            Self::Plains | Self::Start => Cell::new(Terrain::Plains),
            Self::Void => Cell::new(Terrain::Void),
        }
    }
}

/// Rows of `(left, right)`: `left` holds x < 0 written left to right, so its
/// last character is x = -1; `right` starts at x = 0.
pub const DEFAULT_MAP: [(&str, &str); 17] = [
    ("M  0  V ", "p"),
    ("        ", "  "),
    ("     l  ", "   "),
    ("f  V    ", "1  f"),
    ("vf      ", "   fv"),
    ("ff     c", "^   ff"),
    ("     m  ", " ^     "),
    ("        ", "        "),
    ("p  3    ", "t   l   M"),
    ("       ", "      V  "),
    ("V  l  ", "   m     "),
    ("     ", "c       0"),
    ("    ", " ^^      "),
    ("0  ", "     2 l "),
    ("  ", "V        "),
    (" ", "   ff    "),
    ("", "M  fvf  p"),
];

/// Parses `(left, right)` row pairs into a template world.
pub fn parse_template(rows: &[(&str, &str)]) -> World<TemplateTile> {
    let rows = rows
        .iter()
        .map(|(left, right)| {
            WorldRow::new(
                left.chars().rev().map(TemplateTile::from_char).collect(),
                right.chars().map(TemplateTile::from_char).collect(),
            )
        })
        .collect();
    World::new(rows)
}

pub fn default_template() -> World<TemplateTile> {
    parse_template(&DEFAULT_MAP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Position;

    fn count(world: &World<TemplateTile>, tile: TemplateTile) -> usize {
        world.list_hexes().filter(|(_, t)| **t == tile).count()
    }

    #[test]
    fn default_map_has_expected_landmarks() {
        let world = default_template();
        assert_eq!(count(&world, TemplateTile::Start), 3);
        assert_eq!(count(&world, TemplateTile::Cave), 2);
        assert_eq!(count(&world, TemplateTile::Marlon), 1);
        assert_eq!(count(&world, TemplateTile::Portal), 3);
        assert_eq!(count(&world, TemplateTile::SageWithChimney), 1);
        assert_eq!(count(&world, TemplateTile::SageWithSharpRoof), 1);
        assert_eq!(count(&world, TemplateTile::SageWithSmoothRoof), 1);
        let villages =
            count(&world, TemplateTile::PlainsVillage) + count(&world, TemplateTile::ForestVillage);
        assert_eq!(villages, 8);
    }

    #[test]
    fn left_segment_is_reversed() {
        let world = default_template();
        assert_eq!(world.get(Position::new(-8, 0)), Some(&TemplateTile::Merchant));
        assert_eq!(world.get(Position::new(-5, 0)), Some(&TemplateTile::Start));
        assert_eq!(world.get(Position::new(0, 0)), Some(&TemplateTile::Portal));
        assert_eq!(world.get(Position::new(-1, 5)), Some(&TemplateTile::Cave));
    }

    #[test]
    fn cells_carry_objects_on_the_right_terrain() {
        assert_eq!(TemplateTile::Cave.to_cell().terrain, Terrain::Mountain);
        assert_eq!(TemplateTile::ForestVillage.to_cell().terrain, Terrain::Forest);
        assert!(TemplateTile::Start.to_cell().is_free());
        assert_eq!(TemplateTile::from_char('#'), TemplateTile::Void);
    }
}
