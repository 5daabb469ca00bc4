use super::action::ActionKind;
use crate::Chips;

/// One entry of a seat's `legalActions`, with inclusive bounds
/// and the index the action will be logged under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Legal {
    pub kind: ActionKind,
    pub min: Chips,
    pub max: Chips,
    pub index: u64,
}

impl Legal {
    pub fn contains(&self, amount: Chips) -> bool {
        !self.kind.is_monetary() || (self.min..=self.max).contains(&amount)
    }
}

impl std::fmt::Display for Legal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind.is_monetary() {
            true if self.min == self.max => write!(f, "{} {}", self.kind, self.min),
            true => write!(f, "{} [{}, {}]", self.kind, self.min, self.max),
            false => write!(f, "{}", self.kind),
        }
    }
}
