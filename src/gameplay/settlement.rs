use super::status::Status;
use crate::Chips;
use crate::Position;
use crate::cards::evaluation::Evaluation;
use crate::cards::hole::Hole;
use colored::Colorize;

/// A seat's claim at the end of a hand, and what it collected.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub position: Position,
    pub address: String,
    pub status: Status,
    pub hole: Option<Hole>,
    pub risked: Chips,
    pub reward: Chips,
    pub evaluation: Option<Evaluation>,
}

impl Settlement {
    /// may still collect from pots it is eligible for
    pub fn is_contender(&self) -> bool {
        matches!(
            self.status,
            Status::Active | Status::AllIn | Status::Showing
        )
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let hand = self
            .evaluation
            .as_ref()
            .map(|e| e.description())
            .unwrap_or_default();
        if self.reward > 0 {
            let reward = format!("+{}", self.reward).green();
            write!(f, "{:<3}{:<24} {}", self.position, reward, hand)
        } else {
            write!(f, "{:<3}{:<24} {}", self.position, "", hand)
        }
    }
}
