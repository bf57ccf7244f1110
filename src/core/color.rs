//! Player colors, external player ids and per-color storage.
//!
//! ## Color
//!
//! The engine's tri-state owner tag. `NoColor` means "unset" or "no winner";
//! it is never an acting player.
//!
//! ## ColorMapper
//!
//! Translates between `Color` and the `PlayerId` handed to drivers. In
//! external mode players are `0` (WHITE) and `1` (BLACK); otherwise the id is
//! the engine's raw color value and the mapping is the identity.
//!
//! ## ColorMap
//!
//! Two-slot storage indexed by `Color`, used for per-player counters.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::{GammonError, Result};

/// Checker and player color, with the engine's raw values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    #[default]
    NoColor = 0,
    White = 1,
    Black = 2,
}

impl Color {
    /// The two acting colors, WHITE first.
    pub const PLAYERS: [Color; 2] = [Color::White, Color::Black];

    /// Decode a raw engine value.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Color::NoColor),
            1 => Some(Color::White),
            2 => Some(Color::Black),
            _ => None,
        }
    }

    /// The engine's raw value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// True for WHITE and BLACK.
    #[must_use]
    pub const fn is_player(self) -> bool {
        matches!(self, Color::White | Color::Black)
    }

    /// The opposing color.
    ///
    /// Fails with `InvalidColor` for `NoColor`.
    pub fn opponent(self) -> Result<Color> {
        match self {
            Color::White => Ok(Color::Black),
            Color::Black => Ok(Color::White),
            Color::NoColor => Err(GammonError::InvalidColor(self)),
        }
    }

    /// Return `self` if it is an acting color.
    pub fn require_player(self) -> Result<Color> {
        if self.is_player() {
            Ok(self)
        } else {
            Err(GammonError::InvalidColor(self))
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::NoColor => "NOCOLOR",
            Color::White => "WHITE",
            Color::Black => "BLACK",
        };
        f.write_str(name)
    }
}

/// Player identifier as seen by drivers.
///
/// Its meaning depends on the episode's [`ColorMapper`]: `0`/`1` in external
/// mode, the raw color value (`1`/`2`) otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw id.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Bijection between [`Color`] and [`PlayerId`].
///
/// A pure function of the `external` flag, which is fixed when the owning
/// episode is constructed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMapper {
    external: bool,
}

impl ColorMapper {
    /// Create a mapper for the given mode.
    #[must_use]
    pub const fn new(external: bool) -> Self {
        Self { external }
    }

    /// Whether ids are exposed as `0`/`1`.
    #[must_use]
    pub const fn is_external(self) -> bool {
        self.external
    }

    /// Map a driver-facing id to an engine color.
    ///
    /// External mode: `0` → WHITE, `1` → BLACK, anything else fails.
    /// Internal mode: the id must be the raw value of WHITE or BLACK.
    pub fn to_internal(self, id: PlayerId) -> Result<Color> {
        let invalid = GammonError::InvalidPlayerId {
            id: id.0,
            external: self.external,
        };
        if self.external {
            match id.0 {
                0 => Ok(Color::White),
                1 => Ok(Color::Black),
                _ => Err(invalid),
            }
        } else {
            match Color::from_raw(id.0) {
                Some(color) if color.is_player() => Ok(color),
                _ => Err(invalid),
            }
        }
    }

    /// Map an engine color to its driver-facing id.
    ///
    /// Fails with `InvalidColor` for `NoColor` in either mode.
    pub fn to_external(self, color: Color) -> Result<PlayerId> {
        let color = color.require_player()?;
        if self.external {
            Ok(PlayerId(color.raw() - 1))
        } else {
            Ok(PlayerId(color.raw()))
        }
    }
}

/// Per-color storage for the two acting colors.
///
/// Indexing with `NoColor` panics; use [`ColorMap::get`] when the color is
/// not known to be valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    white: T,
    black: T,
}

impl<T> ColorMap<T> {
    /// Get a reference to a color's entry.
    #[must_use]
    pub fn get(&self, color: Color) -> Option<&T> {
        match color {
            Color::White => Some(&self.white),
            Color::Black => Some(&self.black),
            Color::NoColor => None,
        }
    }

    /// Get a mutable reference to a color's entry.
    pub fn get_mut(&mut self, color: Color) -> Option<&mut T> {
        match color {
            Color::White => Some(&mut self.white),
            Color::Black => Some(&mut self.black),
            Color::NoColor => None,
        }
    }

    /// Iterate over (Color, &T) pairs, WHITE first.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        [(Color::White, &self.white), (Color::Black, &self.black)].into_iter()
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        match self.get(color) {
            Some(value) => value,
            None => panic!("ColorMap has no entry for {color}"),
        }
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        match self.get_mut(color) {
            Some(value) => value,
            None => panic!("ColorMap has no entry for {color}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_raw_values() {
        assert_eq!(Color::NoColor.raw(), 0);
        assert_eq!(Color::White.raw(), 1);
        assert_eq!(Color::Black.raw(), 2);
        assert_eq!(Color::from_raw(2), Some(Color::Black));
        assert_eq!(Color::from_raw(3), None);
    }

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::White.opponent(), Ok(Color::Black));
        assert_eq!(Color::Black.opponent(), Ok(Color::White));
        assert_eq!(
            Color::NoColor.opponent(),
            Err(GammonError::InvalidColor(Color::NoColor))
        );
    }

    #[test]
    fn test_external_mapping() {
        let mapper = ColorMapper::new(true);

        assert_eq!(mapper.to_internal(PlayerId(0)), Ok(Color::White));
        assert_eq!(mapper.to_internal(PlayerId(1)), Ok(Color::Black));
        assert_eq!(mapper.to_external(Color::White), Ok(PlayerId(0)));
        assert_eq!(mapper.to_external(Color::Black), Ok(PlayerId(1)));
    }

    #[test]
    fn test_external_mapping_rejects_out_of_range() {
        let mapper = ColorMapper::new(true);

        assert_eq!(
            mapper.to_internal(PlayerId(2)),
            Err(GammonError::InvalidPlayerId { id: 2, external: true })
        );
        assert_eq!(
            mapper.to_external(Color::NoColor),
            Err(GammonError::InvalidColor(Color::NoColor))
        );
    }

    #[test]
    fn test_internal_mapping_is_identity() {
        let mapper = ColorMapper::new(false);

        for color in Color::PLAYERS {
            let id = mapper.to_external(color).unwrap();
            assert_eq!(id.value(), color.raw());
            assert_eq!(mapper.to_internal(id), Ok(color));
        }
        assert!(mapper.to_internal(PlayerId(0)).is_err());
        assert!(mapper.to_external(Color::NoColor).is_err());
    }

    #[test]
    fn test_color_map_access() {
        let mut hits: ColorMap<u32> = ColorMap::default();
        hits[Color::White] += 2;
        *hits.get_mut(Color::Black).unwrap() += 1;

        assert_eq!(hits[Color::White], 2);
        assert_eq!(hits[Color::Black], 1);
        assert!(hits.get(Color::NoColor).is_none());

        let pairs: Vec<_> = hits.iter().collect();
        assert_eq!(pairs, vec![(Color::White, &2), (Color::Black, &1)]);
    }

    #[test]
    #[should_panic(expected = "ColorMap has no entry for NOCOLOR")]
    fn test_color_map_nocolor_index() {
        let map: ColorMap<u32> = ColorMap::default();
        let _ = map[Color::NoColor];
    }

    #[test]
    fn test_color_serialization() {
        let json = serde_json::to_string(&Color::Black).unwrap();
        let color: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(color, Color::Black);
    }
}
