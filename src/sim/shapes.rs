//! Ship sprite lookup
//!
//! Sprites are small digit matrices keyed by facing. The renderer owns how
//! they are drawn; the simulation only needs to know which facings exist (for
//! the qualified-facing fallback) and how big the sprite is (for projectile
//! size).

use std::collections::HashMap;

use super::direction::{BaseDirection, Facing, ScrollMode};

/// Rows of palette codes; 0 is transparent
pub type ShapeMatrix = Vec<Vec<u8>>;

/// Palette for sprite codes 1..=7
pub fn pixel_color(code: u8) -> Option<[u8; 3]> {
    match code {
        1 => Some([220, 220, 220]),
        2 => Some([180, 180, 180]),
        3 => Some([140, 140, 140]),
        4 => Some([100, 100, 100]),
        5 => Some([57, 255, 20]),
        6 => Some([0, 255, 255]),
        7 => Some([255, 20, 147]),
        _ => None,
    }
}

/// Parse digit rows; whitespace-only lines are skipped and non-digits read as 0
pub fn parse_shape<'a>(rows: impl IntoIterator<Item = &'a str>) -> ShapeMatrix {
    rows.into_iter()
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.chars()
                .map(|c| c.to_digit(10).unwrap_or(0) as u8)
                .collect()
        })
        .collect()
}

/// Facing -> sprite lookup with a fixed fallback chain
#[derive(Debug, Clone, Default)]
pub struct ShapeTable {
    shapes: HashMap<Facing, ShapeMatrix>,
}

impl ShapeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, facing: Facing, shape: ShapeMatrix) {
        self.shapes.insert(facing, shape);
    }

    pub fn contains(&self, facing: Facing) -> bool {
        self.shapes.contains_key(&facing)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// The facing actually shown for `base` in `scroll` mode: the qualified
    /// sprite when the table has one, otherwise the bare base direction.
    pub fn resolve_shape(&self, base: BaseDirection, scroll: ScrollMode) -> Facing {
        match scroll {
            ScrollMode::Middle => Facing::bare(base),
            ScrollMode::Inward | ScrollMode::Outward => {
                let qualified = Facing::new(base, scroll);
                if self.contains(qualified) {
                    qualified
                } else {
                    Facing::bare(base)
                }
            }
        }
    }

    /// Sprite for `facing`, falling back to its bare base and then to up
    pub fn get(&self, facing: Facing) -> Option<&ShapeMatrix> {
        self.shapes
            .get(&facing)
            .or_else(|| self.shapes.get(&Facing::bare(facing.base)))
            .or_else(|| self.shapes.get(&Facing::UP))
    }

    /// Sprite size in screen pixels; (0, 0) if nothing resolves
    pub fn size_px(&self, facing: Facing, pixel_size: u32) -> (u32, u32) {
        match self.get(facing) {
            Some(shape) => {
                let cols = shape.first().map_or(0, |row| row.len()) as u32;
                let rows = shape.len() as u32;
                (cols * pixel_size, rows * pixel_size)
            }
            None => (0, 0),
        }
    }

    /// The stock ship: 8 bare sprites plus inward and outward variants of each
    pub fn standard() -> Self {
        let mut table = Self::new();
        for (key, rows) in STANDARD_SHAPES {
            table.insert(Facing::parse(key), parse_shape(rows.iter().copied()));
        }
        table
    }
}

const STANDARD_SHAPES: &[(&str, &[&str])] = &[
    ("up", &["0002000", "0022200", "0223220", "0225220", "0022200", "0002000"]),
    ("down", &["0002000", "0022200", "0225220", "0223220", "0022200", "0002000"]),
    ("left", &["0000200", "0002220", "0022522", "0223220", "0002220", "0000200"]),
    ("right", &["0020000", "0222000", "2252200", "0223220", "0222000", "0020000"]),
    ("up-right", &["000220", "002222", "022522", "022522", "002220", "000220"]),
    ("up-left", &["022000", "222220", "225520", "225520", "222220", "022000"]),
    ("down-right", &["000220", "002222", "022522", "022522", "002220", "000220"]),
    ("down-left", &["220000", "222220", "225520", "225520", "222220", "022000"]),
    ("up_outward", &["0002000", "0022200", "0223220", "2255222", "0022200", "0002000"]),
    ("down_outward", &["0002000", "0022200", "0223220", "2255222", "0022200", "0002000"]),
    ("left_outward", &["0000200", "0002220", "0022522", "0223220", "0002220", "0000200"]),
    ("right_outward", &["0020000", "0222000", "2252200", "0223220", "0222000", "0020000"]),
    ("up-right_outward", &["000330", "003333", "033533", "335533", "003333", "000330"]),
    ("up-left_outward", &["033000", "333330", "335530", "335533", "333330", "033000"]),
    ("down-right_outward", &["000330", "003333", "033533", "335533", "003333", "000330"]),
    ("down-left_outward", &["330000", "333330", "335530", "335533", "333330", "033000"]),
    ("up_inward", &["0004000", "0044400", "0445540", "0044400", "0004000", "0000000"]),
    ("down_inward", &["0000000", "0004000", "0044400", "0445540", "0044400", "0004000"]),
    ("left_inward", &["0000000", "0000400", "0004554", "0045554", "0004554", "0000400"]),
    ("right_inward", &["0000000", "0040000", "4555400", "4555540", "4555400", "0040000"]),
    ("up-right_inward", &["000440", "004444", "044554", "445554", "004444", "000440"]),
    ("up-left_inward", &["440000", "444440", "445540", "445554", "444440", "440000"]),
    ("down-right_inward", &["000440", "004444", "044554", "445554", "004444", "000440"]),
    ("down-left_inward", &["440000", "444440", "445540", "445554", "444440", "440000"]),
];
