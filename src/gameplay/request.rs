use super::action::Action;
use super::record::Record;
use super::round::Round;
use crate::Position;

/// An action submitted on behalf of `address`.
///
/// `index` must echo the index advertised in the seat's legal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub address: String,
    pub action: Action,
    pub index: u64,
    pub timestamp: Option<u64>,
}

impl Request {
    pub fn new(address: impl Into<String>, action: Action, index: u64) -> Self {
        Self {
            address: address.into(),
            action,
            index,
            timestamp: None,
        }
    }
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// What an accepted request did to the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub record: Record,
    pub round: Round,
    pub next_to_act: Option<Position>,
}

impl std::fmt::Display for Receipt {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.next_to_act {
            Some(seat) => write!(f, "{} -> {} seat {}", self.record, self.round, seat),
            None => write!(f, "{} -> {}", self.record, self.round),
        }
    }
}
