//! Lobby configuration, the color ring, and the lobby state tag.

use std::fmt;

use ludocast_protocol::Color;
use serde::{Deserialize, Serialize};

use crate::LobbyError;

// ---------------------------------------------------------------------------
// ColorRing
// ---------------------------------------------------------------------------

/// The global turn ring: a fixed cyclic order over every color.
///
/// Turn orders for a lobby are this ring restricted to the colors that
/// were actually claimed. The ring is fixed at startup and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct ColorRing(Vec<Color>);

impl ColorRing {
    /// Builds a ring from an explicit order.
    ///
    /// # Errors
    /// `LobbyError::InvalidRing` unless `order` lists every color exactly
    /// once.
    pub fn new(order: Vec<Color>) -> Result<Self, LobbyError> {
        if order.len() != Color::ALL.len() {
            return Err(LobbyError::InvalidRing(format!(
                "expected {} colors, got {}",
                Color::ALL.len(),
                order.len()
            )));
        }
        for color in Color::ALL {
            if !order.contains(&color) {
                return Err(LobbyError::InvalidRing(format!("{color} is missing")));
            }
        }
        Ok(Self(order))
    }

    /// The color that follows `color` on the ring.
    pub fn after(&self, color: Color) -> Color {
        match self.0.iter().position(|c| *c == color) {
            Some(i) => self.0[(i + 1) % self.0.len()],
            // Unreachable for a validated ring: every color has a slot.
            None => color,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ColorRing {
    /// green → red → blue → yellow → green
    fn default() -> Self {
        Self(vec![Color::Green, Color::Red, Color::Blue, Color::Yellow])
    }
}

impl TryFrom<Vec<Color>> for ColorRing {
    type Error = LobbyError;

    fn try_from(order: Vec<Color>) -> Result<Self, Self::Error> {
        Self::new(order)
    }
}

impl From<ColorRing> for Vec<Color> {
    fn from(ring: ColorRing) -> Self {
        ring.0
    }
}

impl fmt::Display for ColorRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, color) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" → ")?;
            }
            write!(f, "{color}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LobbyConfig
// ---------------------------------------------------------------------------

/// Settings for one game room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LobbyConfig {
    /// Colors that must be claimed before the game starts.
    pub player_count: usize,

    /// The global turn ring.
    pub ring: ColorRing,

    /// Whether a rejected claim is answered with `claimRejected` to the
    /// sender. When `false` rejections are only logged.
    pub notify_rejections: bool,
}

impl LobbyConfig {
    /// Checks that the player count fits the ring.
    pub fn validate(&self) -> Result<(), LobbyError> {
        let max = self.ring.len();
        if self.player_count < 2 || self.player_count > max {
            return Err(LobbyError::InvalidPlayerCount {
                count: self.player_count,
                max,
            });
        }
        Ok(())
    }
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            ring: ColorRing::default(),
            notify_rejections: true,
        }
    }
}

// ---------------------------------------------------------------------------
// LobbyState
// ---------------------------------------------------------------------------

/// Where a lobby is in its claim cycle.
///
/// ```text
/// Empty → Filling → Filled
///   ↑________________|   (restart, from any state)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LobbyState {
    /// No color claimed.
    Empty,
    /// Some, but not all, seats claimed.
    Filling,
    /// Every seat claimed and the turn order fixed.
    Filled,
}

impl LobbyState {
    /// Returns `true` if claims are still being accepted.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Filled)
    }
}

impl fmt::Display for LobbyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Filling => write!(f, "Filling"),
            Self::Filled => write!(f, "Filled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ring_order() {
        let ring = ColorRing::default();
        assert_eq!(ring.after(Color::Green), Color::Red);
        assert_eq!(ring.after(Color::Red), Color::Blue);
        assert_eq!(ring.after(Color::Blue), Color::Yellow);
        assert_eq!(ring.after(Color::Yellow), Color::Green);
        assert_eq!(ring.to_string(), "green → red → blue → yellow");
    }

    #[test]
    fn test_ring_rejects_missing_and_repeated_colors() {
        let short = ColorRing::new(vec![Color::Green, Color::Red]);
        assert!(matches!(short, Err(LobbyError::InvalidRing(_))));

        let repeated = ColorRing::new(vec![Color::Green, Color::Red, Color::Red, Color::Blue]);
        assert!(matches!(repeated, Err(LobbyError::InvalidRing(msg)) if msg.contains("yellow")));
    }

    #[test]
    fn test_ring_deserialization_is_validated() {
        let ok: ColorRing =
            serde_json::from_str(r#"["yellow","blue","red","green"]"#).unwrap();
        assert_eq!(ok.after(Color::Yellow), Color::Blue);
        assert!(serde_json::from_str::<ColorRing>(r#"["yellow","blue"]"#).is_err());
    }

    #[test]
    fn test_config_default() {
        let config = LobbyConfig::default();
        assert_eq!(config.player_count, 2);
        assert_eq!(config.ring, ColorRing::default());
        assert!(config.notify_rejections);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_player_count_bounds() {
        for count in [0, 1, 5] {
            let config = LobbyConfig {
                player_count: count,
                ..LobbyConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(LobbyError::InvalidPlayerCount { max: 4, .. })
            ));
        }
        for count in 2..=4 {
            let config = LobbyConfig {
                player_count: count,
                ..LobbyConfig::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_lobby_state_is_open() {
        assert!(LobbyState::Empty.is_open());
        assert!(LobbyState::Filling.is_open());
        assert!(!LobbyState::Filled.is_open());
        assert_eq!(LobbyState::Filling.to_string(), "Filling");
    }
}
