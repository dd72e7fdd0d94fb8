//! Authoritative claim state for one game room.

use ludocast_protocol::{Color, GameStart, TurnSequence};

use crate::{ColorRing, LobbyConfig, LobbyError, LobbyState, compute_sequence};

/// Result of an accepted claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Claim {
    /// The color was taken; seats are still open.
    Joined,
    /// The color took the last seat; the turn order is now fixed.
    Filled(GameStart),
}

/// A read-only copy of the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Claimed colors in claim order.
    pub claimed: Vec<Color>,
    pub state: LobbyState,
    /// Present once the room is `Filled`.
    pub sequence: Option<TurnSequence>,
}

/// Claimed colors, in arrival order, and the turn order once full.
///
/// Colors are only ever released all at once by [`restart`](Self::restart);
/// a client going away keeps its claim.
#[derive(Debug, Clone)]
pub struct Room {
    ring: ColorRing,
    player_count: usize,
    claimed: Vec<Color>,
    sequence: Option<TurnSequence>,
}

impl Room {
    /// Creates an empty room. `config` should already be validated.
    pub fn new(config: &LobbyConfig) -> Self {
        Self {
            ring: config.ring.clone(),
            player_count: config.player_count,
            claimed: Vec::with_capacity(config.player_count),
            sequence: None,
        }
    }

    pub fn state(&self) -> LobbyState {
        if self.claimed.is_empty() {
            LobbyState::Empty
        } else if self.sequence.is_some() {
            LobbyState::Filled
        } else {
            LobbyState::Filling
        }
    }

    /// Claims `color` for whoever asked.
    ///
    /// The claim that takes the last seat fixes the turn order, opening
    /// with the first color claimed.
    ///
    /// # Errors
    /// - `AlreadyTaken` if the color is claimed
    /// - `RoomFull` if every seat is already claimed
    pub fn claim(&mut self, color: Color) -> Result<Claim, LobbyError> {
        if self.claimed.contains(&color) {
            return Err(LobbyError::AlreadyTaken(color));
        }
        if !self.state().is_open() {
            return Err(LobbyError::RoomFull(self.player_count));
        }

        self.claimed.push(color);
        if self.claimed.len() < self.player_count {
            return Ok(Claim::Joined);
        }

        let first = self.claimed[0];
        match compute_sequence(&self.ring, &self.claimed, first) {
            Ok(sequence) => {
                self.sequence = Some(sequence.clone());
                Ok(Claim::Filled(GameStart { sequence, first }))
            }
            Err(e) => {
                self.claimed.pop();
                Err(e)
            }
        }
    }

    /// Releases every claim and forgets the turn order.
    pub fn restart(&mut self) {
        self.claimed.clear();
        self.sequence = None;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            claimed: self.claimed.clone(),
            state: self.state(),
            sequence: self.sequence.clone(),
        }
    }

    /// Claimed colors in claim order.
    pub fn claimed(&self) -> &[Color] {
        &self.claimed
    }

    pub fn sequence(&self) -> Option<&TurnSequence> {
        self.sequence.as_ref()
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    pub fn ring(&self) -> &ColorRing {
        &self.ring
    }
}
