use crate::Chips;
use crate::Position;
use colored::*;
use serde::Deserialize;
use serde::Serialize;

/// The closed set of action names found in the log and in legal action lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Join,
    Leave,
    TopUp,
    SitOut,
    SitIn,
    PostSmallBlind,
    PostBigBlind,
    Deal,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
    Show,
    Muck,
    NewHand,
}

impl ActionKind {
    pub const fn all() -> [ActionKind; 17] {
        [
            ActionKind::Join,
            ActionKind::Leave,
            ActionKind::TopUp,
            ActionKind::SitOut,
            ActionKind::SitIn,
            ActionKind::PostSmallBlind,
            ActionKind::PostBigBlind,
            ActionKind::Deal,
            ActionKind::Fold,
            ActionKind::Check,
            ActionKind::Call,
            ActionKind::Bet,
            ActionKind::Raise,
            ActionKind::AllIn,
            ActionKind::Show,
            ActionKind::Muck,
            ActionKind::NewHand,
        ]
    }
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Join => "join",
            ActionKind::Leave => "leave",
            ActionKind::TopUp => "top-up",
            ActionKind::SitOut => "sit-out",
            ActionKind::SitIn => "sit-in",
            ActionKind::PostSmallBlind => "post-small-blind",
            ActionKind::PostBigBlind => "post-big-blind",
            ActionKind::Deal => "deal",
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all-in",
            ActionKind::Show => "show",
            ActionKind::Muck => "muck",
            ActionKind::NewHand => "new-hand",
        }
    }
    /// carries a chip amount on the wire
    pub fn is_monetary(&self) -> bool {
        matches!(
            self,
            ActionKind::Join
                | ActionKind::Leave
                | ActionKind::TopUp
                | ActionKind::PostSmallBlind
                | ActionKind::PostBigBlind
                | ActionKind::Call
                | ActionKind::Bet
                | ActionKind::Raise
                | ActionKind::AllIn
        )
    }
    /// only the seat whose turn it is may take it
    pub fn is_turn_bound(&self) -> bool {
        matches!(
            self,
            ActionKind::PostSmallBlind
                | ActionKind::PostBigBlind
                | ActionKind::Fold
                | ActionKind::Check
                | ActionKind::Call
                | ActionKind::Bet
                | ActionKind::Raise
                | ActionKind::AllIn
                | ActionKind::Show
                | ActionKind::Muck
        )
    }
}

impl TryFrom<&str> for ActionKind {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        ActionKind::all()
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown action {:?}", s))
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An action with exactly the payload its kind needs.
///
/// Wager amounts are the chips this action moves from the stack
/// into the pot, not the seat's running total for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Join(Position, Chips),
    Leave(Chips),
    TopUp(Chips),
    SitOut,
    SitIn,
    SmallBlind(Chips),
    BigBlind(Chips),
    Deal,
    Fold,
    Check,
    Call(Chips),
    Bet(Chips),
    Raise(Chips),
    Shove(Chips),
    Show,
    Muck,
    NewHand,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Join(..) => ActionKind::Join,
            Action::Leave(_) => ActionKind::Leave,
            Action::TopUp(_) => ActionKind::TopUp,
            Action::SitOut => ActionKind::SitOut,
            Action::SitIn => ActionKind::SitIn,
            Action::SmallBlind(_) => ActionKind::PostSmallBlind,
            Action::BigBlind(_) => ActionKind::PostBigBlind,
            Action::Deal => ActionKind::Deal,
            Action::Fold => ActionKind::Fold,
            Action::Check => ActionKind::Check,
            Action::Call(_) => ActionKind::Call,
            Action::Bet(_) => ActionKind::Bet,
            Action::Raise(_) => ActionKind::Raise,
            Action::Shove(_) => ActionKind::AllIn,
            Action::Show => ActionKind::Show,
            Action::Muck => ActionKind::Muck,
            Action::NewHand => ActionKind::NewHand,
        }
    }
    /// the chip amount carried, zero for non-monetary actions
    pub fn amount(&self) -> Chips {
        match *self {
            Action::Join(_, chips)
            | Action::Leave(chips)
            | Action::TopUp(chips)
            | Action::SmallBlind(chips)
            | Action::BigBlind(chips)
            | Action::Call(chips)
            | Action::Bet(chips)
            | Action::Raise(chips)
            | Action::Shove(chips) => chips,
            _ => 0,
        }
    }
    /// moves chips from the stack into the pot
    pub fn is_wager(&self) -> bool {
        matches!(
            self,
            Action::SmallBlind(_)
                | Action::BigBlind(_)
                | Action::Call(_)
                | Action::Bet(_)
                | Action::Raise(_)
                | Action::Shove(_)
        )
    }
    pub fn is_blind(&self) -> bool {
        matches!(self, Action::SmallBlind(_) | Action::BigBlind(_))
    }
    /// a decision taken in turn during a betting round
    pub fn is_voluntary(&self) -> bool {
        matches!(
            self,
            Action::Fold
                | Action::Check
                | Action::Call(_)
                | Action::Bet(_)
                | Action::Raise(_)
                | Action::Shove(_)
        )
    }
    pub fn is_reveal(&self) -> bool {
        matches!(self, Action::Show | Action::Muck)
    }
    /// rebuild from wire parts. `seat` only matters for joins.
    pub fn from_parts(kind: ActionKind, amount: Chips, seat: Position) -> Self {
        match kind {
            ActionKind::Join => Action::Join(seat, amount),
            ActionKind::Leave => Action::Leave(amount),
            ActionKind::TopUp => Action::TopUp(amount),
            ActionKind::SitOut => Action::SitOut,
            ActionKind::SitIn => Action::SitIn,
            ActionKind::PostSmallBlind => Action::SmallBlind(amount),
            ActionKind::PostBigBlind => Action::BigBlind(amount),
            ActionKind::Deal => Action::Deal,
            ActionKind::Fold => Action::Fold,
            ActionKind::Check => Action::Check,
            ActionKind::Call => Action::Call(amount),
            ActionKind::Bet => Action::Bet(amount),
            ActionKind::Raise => Action::Raise(amount),
            ActionKind::AllIn => Action::Shove(amount),
            ActionKind::Show => Action::Show,
            ActionKind::Muck => Action::Muck,
            ActionKind::NewHand => Action::NewHand,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Join(seat, chips) => write!(f, "{}", format!("JOIN  {} {}", seat, chips).white()),
            Action::Leave(chips) => write!(f, "{}", format!("LEAVE {}", chips).white()),
            Action::TopUp(chips) => write!(f, "{}", format!("TOPUP {}", chips).white()),
            Action::SitOut => write!(f, "{}", "SITOUT".bright_black()),
            Action::SitIn => write!(f, "{}", "SITIN".white()),
            Action::SmallBlind(chips) => write!(f, "{}", format!("SBLND {}", chips).white()),
            Action::BigBlind(chips) => write!(f, "{}", format!("BBLND {}", chips).white()),
            Action::Deal => write!(f, "{}", "DEAL".white()),
            Action::Fold => write!(f, "{}", "FOLD".red()),
            Action::Check => write!(f, "{}", "CHECK".cyan()),
            Action::Call(chips) => write!(f, "{}", format!("CALL  {}", chips).yellow()),
            Action::Bet(chips) => write!(f, "{}", format!("BET   {}", chips).green()),
            Action::Raise(chips) => write!(f, "{}", format!("RAISE {}", chips).green()),
            Action::Shove(chips) => write!(f, "{}", format!("SHOVE {}", chips).magenta()),
            Action::Show => write!(f, "{}", "SHOW".blue()),
            Action::Muck => write!(f, "{}", "MUCK".red()),
            Action::NewHand => write!(f, "{}", "NEWHAND".white()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_roundtrip_through_parts() {
        for kind in ActionKind::all() {
            let action = Action::from_parts(kind, 5, 3);
            assert_eq!(action.kind(), kind);
            assert_eq!(action.amount() > 0, kind.is_monetary());
            assert_eq!(ActionKind::try_from(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn wire_names() {
        assert_eq!(Action::Shove(1).kind().as_str(), "all-in");
        assert_eq!(Action::SmallBlind(1).kind().as_str(), "post-small-blind");
        assert_eq!(
            serde_json::to_string(&ActionKind::NewHand).unwrap(),
            "\"new-hand\""
        );
    }

    #[test]
    fn blinds_are_wagers_not_decisions() {
        assert!(Action::BigBlind(2).is_wager());
        assert!(!Action::BigBlind(2).is_voluntary());
        assert!(Action::Check.is_voluntary());
        assert!(!Action::Check.is_wager());
    }
}
