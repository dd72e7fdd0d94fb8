//! Value types carried inside lobby events.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// A player marker a client can claim.
///
/// Serialized as its lowercase name: `Color::Green` is `"green"`.
/// The derived `Ord` follows declaration order and is only used for
/// stable map ordering; turn order comes from the lobby's color ring.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Green,
    Red,
    Blue,
    Yellow,
}

impl Color {
    /// Every color, in declaration order.
    pub const ALL: [Color; 4] = [Color::Green, Color::Red, Color::Blue, Color::Yellow];

    /// The wire name of this color.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProtocolError::InvalidMessage(format!("unknown color: {s:?}")))
    }
}

// ---------------------------------------------------------------------------
// TurnSequence
// ---------------------------------------------------------------------------

/// The successor entry of one color in a [`TurnSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Successor {
    pub next: Color,
}

/// Cyclic play order over the claimed colors.
///
/// On the wire this is the successor map clients already understand:
///
/// ```json
/// {"green": {"next": "red"}, "red": {"next": "green"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnSequence(BTreeMap<Color, Successor>);

impl TurnSequence {
    /// Returns the color that plays after `color`, if `color` takes part.
    pub fn next(&self, color: Color) -> Option<Color> {
        self.0.get(&color).map(|s| s.next)
    }

    /// Returns `true` if `color` has a place in the sequence.
    pub fn contains(&self, color: Color) -> bool {
        self.0.contains_key(&color)
    }

    /// Number of colors in the cycle.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Walks the cycle starting at `start` and lists each color once.
    ///
    /// Stops early if a link is missing, so a malformed sequence never
    /// loops forever. Empty if `start` is not in the sequence.
    pub fn order_from(&self, start: Color) -> Vec<Color> {
        let mut order = Vec::with_capacity(self.len());
        if !self.contains(start) {
            return order;
        }
        let mut color = start;
        while order.len() < self.len() {
            order.push(color);
            match self.next(color) {
                Some(next) if next != start => color = next,
                _ => break,
            }
        }
        order
    }
}

impl FromIterator<(Color, Color)> for TurnSequence {
    fn from_iter<I: IntoIterator<Item = (Color, Color)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(color, next)| (color, Successor { next }))
                .collect(),
        )
    }
}

/// Payload of the `gameStart` event: the play order and who opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStart {
    pub sequence: TurnSequence,
    pub first: Color,
}

// ---------------------------------------------------------------------------
// ChallengeRecord
// ---------------------------------------------------------------------------

/// One entrant of a wager challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub user_id: String,
}

fn default_participant_count() -> u32 {
    2
}

/// A persisted wager challenge, as pushed to clients in `newChallenge`.
///
/// The lobby never interprets it; the challenge subsystem owns the
/// ledger and hands over records after they are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub creator_id: String,
    #[serde(default = "default_participant_count")]
    pub number_of_participants: u32,
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Stake per participant. Records may be stored without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bet: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_winnings: Option<f64>,
    #[serde(default)]
    pub completed: bool,
    /// Creation time as milliseconds since the Unix epoch, not an
    /// ISO-8601 string. Clients convert with `new Date(created)`.
    pub created: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Color::Yellow).unwrap(), "\"yellow\"");
        let c: Color = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(c, Color::Blue);
    }

    #[test]
    fn test_color_rejects_unknown_name() {
        assert!(serde_json::from_str::<Color>("\"purple\"").is_err());
        assert!(serde_json::from_str::<Color>("\"Green\"").is_err());
    }

    #[test]
    fn test_color_from_str_is_lenient_about_case_and_spaces() {
        assert_eq!(" Red ".parse::<Color>().unwrap(), Color::Red);
        assert!(matches!(
            "orange".parse::<Color>(),
            Err(ProtocolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_turn_sequence_json_shape() {
        let seq: TurnSequence = [(Color::Green, Color::Red), (Color::Red, Color::Green)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&seq).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"green": {"next": "red"}, "red": {"next": "green"}})
        );
    }

    #[test]
    fn test_turn_sequence_order_from_walks_cycle() {
        let seq: TurnSequence = [
            (Color::Green, Color::Blue),
            (Color::Blue, Color::Yellow),
            (Color::Yellow, Color::Green),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            seq.order_from(Color::Blue),
            vec![Color::Blue, Color::Yellow, Color::Green]
        );
        assert!(seq.order_from(Color::Red).is_empty());
    }

    #[test]
    fn test_turn_sequence_order_from_stops_on_broken_link() {
        let seq: TurnSequence = [(Color::Green, Color::Red), (Color::Red, Color::Blue)]
            .into_iter()
            .collect();
        assert_eq!(seq.order_from(Color::Green), vec![Color::Green, Color::Red]);
    }

    #[test]
    fn test_game_start_json_shape() {
        let start = GameStart {
            sequence: [(Color::Green, Color::Red), (Color::Red, Color::Green)]
                .into_iter()
                .collect(),
            first: Color::Green,
        };
        let json = serde_json::to_value(&start).unwrap();
        assert_eq!(json["first"], "green");
        assert_eq!(json["sequence"]["red"]["next"], "green");
    }

    #[test]
    fn test_challenge_record_uses_stored_field_names() {
        let json = r#"{
            "_id": "c1",
            "creatorId": "u1",
            "participants": [{"userId": "u1"}],
            "bet": 30,
            "totalWinnings": 48,
            "created": 1700000000000
        }"#;
        let record: ChallengeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "c1");
        assert_eq!(record.number_of_participants, 2);
        assert!(!record.completed);
        assert_eq!(record.participants[0].user_id, "u1");
        assert_eq!(record.bet, Some(30.0));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["_id"], "c1");
        assert_eq!(back["totalWinnings"], 48.0);
    }

    #[test]
    fn test_challenge_record_without_stakes() {
        let json = r#"{"_id": "c2", "creatorId": "u7", "created": 1700000000000}"#;
        let record: ChallengeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.bet, None);
        assert_eq!(record.total_winnings, None);
        assert!(record.participants.is_empty());

        let back = serde_json::to_value(&record).unwrap();
        assert!(back.get("bet").is_none());
        assert!(back.get("totalWinnings").is_none());
        assert_eq!(back["created"], 1_700_000_000_000u64);
    }
}
