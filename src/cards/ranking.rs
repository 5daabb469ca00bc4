use super::rank::Rank;

/// A poker hand's category, with the ranks that define it.
///
/// Variant order is hand strength, so derived Ord compares categories
/// first and defining ranks second. Kickers break the remaining ties.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard(Rank),        // 4 kickers
    OnePair(Rank),         // 3 kickers
    TwoPair(Rank, Rank),   // 1 kickers
    ThreeOAK(Rank),        // 2 kickers
    Straight(Rank),        // 0 kickers
    Flush(Rank),           // 4 kickers, same suit
    FullHouse(Rank, Rank), // 0 kickers
    FourOAK(Rank),         // 1 kickers
    StraightFlush(Rank),   // 0 kickers
}

impl Ranking {
    pub fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard(_) | Ranking::Flush(_) => 4,
            Ranking::OnePair(_) => 3,
            Ranking::ThreeOAK(_) => 2,
            Ranking::FourOAK(_) | Ranking::TwoPair(_, _) => 1,
            _ => 0,
        }
    }

    /// ranks a kicker may not take
    pub fn mask(&self) -> u16 {
        match *self {
            Ranking::TwoPair(hi, lo) | Ranking::FullHouse(hi, lo) => {
                !(u16::from(hi) | u16::from(lo))
            }
            Ranking::HighCard(hi)
            | Ranking::OnePair(hi)
            | Ranking::ThreeOAK(hi)
            | Ranking::FourOAK(hi)
            | Ranking::Flush(hi)
            | Ranking::Straight(hi)
            | Ranking::StraightFlush(hi) => !(u16::from(hi)),
        }
    }

    /// category name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Ranking::HighCard(_) => "High Card",
            Ranking::OnePair(_) => "Pair",
            Ranking::TwoPair(_, _) => "Two Pair",
            Ranking::ThreeOAK(_) => "Three of a Kind",
            Ranking::Straight(_) => "Straight",
            Ranking::Flush(_) => "Flush",
            Ranking::FullHouse(_, _) => "Full House",
            Ranking::FourOAK(_) => "Four of a Kind",
            Ranking::StraightFlush(Rank::Ace) => "Royal Flush",
            Ranking::StraightFlush(_) => "Straight Flush",
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::FullHouse(r1, r2) => write!(f, "FullHouse     {}{}", r1, r2),
            Ranking::TwoPair(r1, r2) => write!(f, "TwoPair       {}{}", r1, r2),
            Ranking::HighCard(r) => write!(f, "HighCard      {} ", r),
            Ranking::OnePair(r) => write!(f, "OnePair       {} ", r),
            Ranking::ThreeOAK(r) => write!(f, "ThreeOfAKind  {} ", r),
            Ranking::Straight(r) => write!(f, "Straight      {} ", r),
            Ranking::FourOAK(r) => write!(f, "FourOfAKind   {} ", r),
            Ranking::Flush(r) => write!(f, "Flush         {} ", r),
            Ranking::StraightFlush(r) => write!(f, "StraightFlush {} ", r),
        }
    }
}
