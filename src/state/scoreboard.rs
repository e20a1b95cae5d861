/// Scoreboard
///
/// Two monotonic per-side goal counters. Process-scoped only; nothing is
/// persisted across runs.
use serde::{Deserialize, Serialize};

/// The side credited by a goal zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Team1,
    Team2,
}

/// Non-negative goal counters, one per side. Increment-only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    team1: u32,
    team2: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Team1 => self.team1 += 1,
            Side::Team2 => self.team2 += 1,
        }
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.team1, self.team2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(Scoreboard::new().scores(), (0, 0));
    }

    #[test]
    fn test_increment_is_per_side() {
        let mut board = Scoreboard::new();
        board.increment(Side::Team1);
        board.increment(Side::Team1);
        board.increment(Side::Team2);
        assert_eq!(board.scores(), (2, 1));
    }

    #[test]
    fn test_side_serialization() {
        let json = serde_json::to_string(&Side::Team1).unwrap();
        let side: Side = serde_json::from_str(&json).unwrap();
        assert_eq!(side, Side::Team1);
    }
}
