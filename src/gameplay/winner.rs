use crate::Chips;
use crate::Position;
use crate::cards::hole::Hole;
use colored::Colorize;

/// One pot won by one seat, or the tournament's last survivor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    pub address: String,
    pub position: Position,
    pub amount: Chips,
    pub cards: Option<Hole>,
    pub name: String,
    pub description: String,
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.position,
            format!("+{}", self.amount).green(),
            self.description
        )
    }
}

/// A finishing place in an elimination format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub place: usize,
    pub address: String,
    pub payout: Chips,
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "#{} {} {}", self.place, self.address, self.payout)
    }
}
