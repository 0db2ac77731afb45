//! Shared data types for the light-cycle spectator.
//! This crate contains pure data with no external dependencies.

/// Render tick interval in milliseconds.
///
/// The tick source is independent of feed message arrival; the loop redraws
/// the latest known state every tick.
pub const TICK_MS: u32 = 30;

/// Color used for bikes whose owner is not in the roster.
pub const DEFAULT_BIKE_COLOR: Rgb = Rgb::new(0x0A, 0x94, 0xFF);

/// Spawn markers are always neutral white, independent of bike colors.
pub const SPAWN_COLOR: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

/// Grid background line color.
pub const GRID_LINE_COLOR: Rgb = Rgb::new(0xDB, 0x1E, 0xD1);

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a CSS-style `#rrggbb` hex color (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }
}

/// A logical grid coordinate. Zero-based; `row` is measured from the bottom
/// of the arena, unlike pixel space where y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

/// A point on the drawing surface. `y` grows downward from the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Drawing surface dimensions, fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Compass heading of a bike. Closed set; anything else on the wire decodes
/// to "no heading" upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    /// Parse from the wire representation (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "N" => Some(Heading::North),
            "E" => Some(Heading::East),
            "S" => Some(Heading::South),
            "W" => Some(Heading::West),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Heading::North => "N",
            Heading::East => "E",
            Heading::South => "S",
            Heading::West => "W",
        }
    }
}

/// Roster entry. Maintained by the feed independently of snapshots and
/// looked up fresh each frame by bike owner id.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub color: Rgb,
    pub frags: u32,
    pub owned: u32,
}

/// A rendered moving entity: current cell, heading, and trail history.
///
/// The trail is ordered from the head end outward; the last element is the
/// oldest recorded cell. Trail length is entirely the responsibility of the
/// upstream state producer.
#[derive(Debug, Clone, PartialEq)]
pub struct Bike {
    pub player_id: u32,
    pub heading: Option<Heading>,
    pub at: GridCell,
    pub trail: Vec<GridCell>,
}

/// One complete, immutable state payload: grid dimensions, bikes, spawns.
/// Replaced wholesale by each feed update; the renderer only reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub cols: u32,
    pub rows: u32,
    pub bikes: Vec<Bike>,
    pub spawns: Vec<GridCell>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_round_trips_through_strings() {
        for h in [Heading::North, Heading::East, Heading::South, Heading::West] {
            assert_eq!(Heading::from_str(h.as_str()), Some(h));
        }
        assert_eq!(Heading::from_str("n"), Some(Heading::North));
        assert_eq!(Heading::from_str("NE"), None);
        assert_eq!(Heading::from_str(""), None);
    }

    #[test]
    fn rgb_parses_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#0A94FF"), Some(Rgb::new(0x0A, 0x94, 0xFF)));
        assert_eq!(Rgb::from_hex("db1ed1"), Some(Rgb::new(0xDB, 0x1E, 0xD1)));
        assert_eq!(Rgb::from_hex("#fff"), None);
        assert_eq!(Rgb::from_hex("#gggggg"), None);
    }
}
