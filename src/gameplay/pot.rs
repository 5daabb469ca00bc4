use crate::Chips;
use crate::Position;

/// Chips contested by a fixed set of seats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<Position>,
}

impl Pot {
    /// Split hand contributions into main and side pots.
    ///
    /// `spent` lists every seat's chips in this hand, `contenders` the seats
    /// still able to win. Each distinct contribution level forms a layer whose
    /// eligible seats are the contenders that paid at least that level.
    /// Layers nobody can win fold into the last winnable pot, and neighbours
    /// with the same eligible seats merge.
    pub fn split(spent: &[(Position, Chips)], contenders: &[Position]) -> Vec<Pot> {
        let mut levels = spent
            .iter()
            .map(|(_, chips)| *chips)
            .filter(|chips| *chips > 0)
            .collect::<Vec<Chips>>();
        levels.sort_unstable();
        levels.dedup();
        let mut pots = Vec::<Pot>::new();
        let mut floor = Chips::default();
        for level in levels {
            let amount = spent
                .iter()
                .map(|(_, chips)| std::cmp::min(*chips, level).saturating_sub(floor))
                .sum::<Chips>();
            let eligible = spent
                .iter()
                .filter(|(seat, chips)| *chips >= level && contenders.contains(seat))
                .map(|(seat, _)| *seat)
                .collect::<Vec<Position>>();
            floor = level;
            match pots.last_mut() {
                Some(last) if last.eligible == eligible || eligible.is_empty() => {
                    last.amount += amount
                }
                _ => pots.push(Pot { amount, eligible }),
            }
        }
        pots
    }
}

impl std::fmt::Display for Pot {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {:?}", self.amount, self.eligible)
    }
}
