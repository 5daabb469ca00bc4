use super::action::Action;
use super::round::Round;
use crate::Position;
use colored::Colorize;

/// One entry of the hand's action log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub address: String,
    pub seat: Position,
    pub action: Action,
    pub round: Round,
    pub index: u64,
    pub timestamp: Option<u64>,
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {:<8} {} {}",
            format!("#{:<4}", self.index).bright_black(),
            self.round,
            self.seat,
            self.action
        )
    }
}
