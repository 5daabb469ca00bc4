use super::action::Action;
use super::record::Record;
use super::round::Round;
use crate::Chips;
use crate::Position;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// What a betting round's history implies about the next decision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Betting {
    /// the smallest legal raise on top of a call
    pub increment: Chips,
    /// seats that took a decision since the high bet last went up
    pub acted: BTreeSet<Position>,
}

/// The hand's append-only action log, `previousActions` on the wire.
///
/// Everything about turn order that is not a seat's own state
/// is replayed from here, so a restored table needs nothing else.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger(Vec<Record>);

impl From<Vec<Record>> for Ledger {
    fn from(records: Vec<Record>) -> Self {
        Self(records)
    }
}

impl Ledger {
    pub fn records(&self) -> &[Record] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn last(&self) -> Option<&Record> {
        self.0.last()
    }
    pub fn push(&mut self, record: Record) {
        self.0.push(record);
    }
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn posted_small(&self) -> bool {
        self.0
            .iter()
            .any(|r| matches!(r.action, Action::SmallBlind(_)))
    }
    pub fn posted_big(&self) -> bool {
        self.0.iter().any(|r| matches!(r.action, Action::BigBlind(_)))
    }
    pub fn dealt(&self) -> bool {
        self.0.iter().any(|r| r.action == Action::Deal)
    }
    /// the most recent entry by `seat`
    pub fn last_by(&self, seat: Position) -> Option<&Record> {
        self.0.iter().rev().find(|r| r.seat == seat)
    }

    /// entries that shape a betting round. preflop inherits the blinds.
    fn wagers_in(&self, round: Round) -> impl Iterator<Item = &Record> {
        self.0.iter().filter(move |r| {
            r.round == round || (round == Round::Preflop && r.action.is_blind())
        })
    }
    /// seat of the last decision or blind in `round`
    pub fn last_seat_in(&self, round: Round) -> Option<Position> {
        self.wagers_in(round)
            .filter(|r| r.action.is_voluntary() || r.action.is_blind())
            .last()
            .map(|r| r.seat)
    }
    /// seat of the last show or muck
    pub fn last_reveal(&self) -> Option<Position> {
        self.0
            .iter()
            .filter(|r| r.action.is_reveal())
            .last()
            .map(|r| r.seat)
    }
    /// the last seat to bet or raise voluntarily this hand
    pub fn aggressor(&self) -> Option<Position> {
        let mut aggressor = None;
        for round in [Round::Preflop, Round::Flop, Round::Turn, Round::River] {
            let mut stakes = BTreeMap::<Position, Chips>::new();
            let mut high = Chips::default();
            for record in self.wagers_in(round).filter(|r| r.action.is_wager()) {
                let stake = stakes.entry(record.seat).or_default();
                *stake += record.action.amount();
                if *stake > high {
                    high = *stake;
                    if record.action.is_voluntary() {
                        aggressor = Some(record.seat);
                    }
                }
            }
        }
        aggressor
    }

    /// replay `round` to find the raise increment and who has acted since the last raise.
    /// no-limit: a full raise resets the increment, anything shorter keeps it.
    pub fn betting(&self, round: Round, blind: Chips) -> Betting {
        let mut stakes = BTreeMap::<Position, Chips>::new();
        let mut high = Chips::default();
        let mut betting = Betting {
            increment: blind,
            acted: BTreeSet::new(),
        };
        for record in self.wagers_in(round) {
            if record.action.is_wager() {
                let stake = stakes.entry(record.seat).or_default();
                *stake += record.action.amount();
                if *stake > high {
                    let raise = *stake - high;
                    if raise >= betting.increment && !record.action.is_blind() {
                        betting.increment = raise;
                    }
                    high = *stake;
                    betting.acted.clear();
                }
            }
            if record.action.is_voluntary() {
                betting.acted.insert(record.seat);
            }
        }
        betting
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seat: Position, action: Action, round: Round) -> Record {
        Record {
            address: format!("0x{}", seat),
            seat,
            action,
            round,
            index: 0,
            timestamp: None,
        }
    }

    fn preflop() -> Ledger {
        Ledger::from(vec![
            record(1, Action::SmallBlind(10), Round::Ante),
            record(2, Action::BigBlind(20), Round::Ante),
            record(1, Action::Deal, Round::Ante),
        ])
    }

    #[test]
    fn big_blind_keeps_the_option() {
        let mut ledger = preflop();
        let betting = ledger.betting(Round::Preflop, 20);
        assert_eq!(betting.increment, 20);
        assert!(betting.acted.is_empty());
        ledger.push(record(1, Action::Call(10), Round::Preflop));
        let betting = ledger.betting(Round::Preflop, 20);
        assert!(betting.acted.contains(&1));
        assert!(!betting.acted.contains(&2));
        assert_eq!(ledger.last_seat_in(Round::Preflop), Some(1));
    }

    #[test]
    fn full_raise_resets_increment() {
        let mut ledger = preflop();
        ledger.push(record(1, Action::Raise(70), Round::Preflop));
        let betting = ledger.betting(Round::Preflop, 20);
        assert_eq!(betting.increment, 60);
        assert_eq!(betting.acted, BTreeSet::from([1]));
        ledger.push(record(2, Action::Shove(70), Round::Preflop));
        let betting = ledger.betting(Round::Preflop, 20);
        assert_eq!(betting.increment, 60);
        assert_eq!(betting.acted, BTreeSet::from([2]));
    }

    #[test]
    fn aggressor_ignores_blinds_and_calls() {
        let mut ledger = preflop();
        assert_eq!(ledger.aggressor(), None);
        ledger.push(record(1, Action::Call(10), Round::Preflop));
        ledger.push(record(2, Action::Check, Round::Preflop));
        assert_eq!(ledger.aggressor(), None);
        ledger.push(record(2, Action::Bet(20), Round::Flop));
        ledger.push(record(1, Action::Call(20), Round::Flop));
        assert_eq!(ledger.aggressor(), Some(2));
    }

    #[test]
    fn flags() {
        let ledger = preflop();
        assert!(ledger.posted_small());
        assert!(ledger.posted_big());
        assert!(ledger.dealt());
        assert!(!Ledger::default().dealt());
    }
}
