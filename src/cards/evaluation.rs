use super::card::Card;
use super::evaluator::Evaluator;
use super::hand::Hand;
use super::hole::Hole;
use super::rank::Rank;
use super::ranking::Ranking;
use super::strength::Strength;
use super::suit::Suit;

/// A seat's showdown hand: its strength, the five cards that make it,
/// and the human readable summary that goes out with the winners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    strength: Strength,
    best: Vec<Card>,
}

impl Evaluation {
    pub fn strength(&self) -> Strength {
        self.strength
    }
    pub fn best(&self) -> &[Card] {
        &self.best
    }
    pub fn name(&self) -> &'static str {
        self.strength.ranking().name()
    }
    /// "Pair, 10's", "Full House, 2s over 5s", "Flush, Ad High" ...
    pub fn description(&self) -> String {
        let suit = self.best.first().map(|c| c.suit().letter()).unwrap_or('s');
        match self.strength.ranking() {
            Ranking::HighCard(r) => format!("{} High", r.word()),
            Ranking::OnePair(r) => format!("Pair, {}'s", r.word()),
            Ranking::TwoPair(hi, lo) => format!("Two Pair, {}'s & {}'s", hi.word(), lo.word()),
            Ranking::ThreeOAK(r) => format!("Three of a Kind, {}'s", r.word()),
            Ranking::Straight(r) => format!("Straight, {} High", r.word()),
            Ranking::Flush(r) => format!("Flush, {}{} High", r.word(), suit),
            Ranking::FullHouse(hi, lo) => {
                format!("Full House, {}s over {}s", hi.word(), lo.word())
            }
            Ranking::FourOAK(r) => format!("Four of a Kind, {}'s", r.word()),
            Ranking::StraightFlush(Rank::Ace) => String::from("Royal Flush"),
            Ranking::StraightFlush(r) => format!("Straight Flush, {}{} High", r.word(), suit),
        }
    }

    /// the ranks of a five card straight topped by `hi`, wheel included
    fn run(hi: Rank) -> Vec<Rank> {
        match hi {
            Rank::Five => vec![Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace],
            _ => (0..5u8).map(|i| Rank::from(u8::from(hi) - i)).collect(),
        }
    }
    /// remove up to `n` cards of `rank` from `hand`, highest suit first
    fn take(hand: &mut Hand, rank: Rank, n: usize) -> Vec<Card> {
        let cards = Suit::all()
            .into_iter()
            .rev()
            .map(|suit| Card::from((rank, suit)))
            .filter(|card| hand.contains(card))
            .take(n)
            .collect::<Vec<Card>>();
        cards.iter().for_each(|card| hand.remove(*card));
        cards
    }
    fn pick(hand: Hand, strength: Strength) -> Vec<Card> {
        let kicks = Vec::<Rank>::from(strength.kickers());
        let flush = Evaluator::from(hand)
            .find_suit_of_flush()
            .map(|suit| hand.of(&suit))
            .unwrap_or(hand);
        let mut hand = hand;
        let mut suited = flush;
        let mut best = match strength.ranking() {
            Ranking::HighCard(r) => Self::take(&mut hand, r, 1),
            Ranking::OnePair(r) => Self::take(&mut hand, r, 2),
            Ranking::ThreeOAK(r) => Self::take(&mut hand, r, 3),
            Ranking::FourOAK(r) => Self::take(&mut hand, r, 4),
            Ranking::TwoPair(hi, lo) => {
                let mut cards = Self::take(&mut hand, hi, 2);
                cards.extend(Self::take(&mut hand, lo, 2));
                cards
            }
            Ranking::FullHouse(hi, lo) => {
                let mut cards = Self::take(&mut hand, hi, 3);
                cards.extend(Self::take(&mut hand, lo, 2));
                cards
            }
            Ranking::Straight(hi) => Self::run(hi)
                .into_iter()
                .flat_map(|r| Self::take(&mut hand, r, 1))
                .collect(),
            Ranking::StraightFlush(hi) => Self::run(hi)
                .into_iter()
                .flat_map(|r| Self::take(&mut suited, r, 1))
                .collect(),
            Ranking::Flush(hi) => Self::take(&mut suited, hi, 1),
        };
        for rank in kicks {
            match strength.ranking() {
                Ranking::Flush(_) => best.extend(Self::take(&mut suited, rank, 1)),
                _ => best.extend(Self::take(&mut hand, rank, 1)),
            }
        }
        best
    }
}

impl From<Hand> for Evaluation {
    fn from(hand: Hand) -> Self {
        let strength = Strength::from(hand);
        let best = Self::pick(hand, strength);
        Self { strength, best }
    }
}

impl From<(Hole, &[Card])> for Evaluation {
    fn from((hole, board): (Hole, &[Card])) -> Self {
        Self::from(Hand::add(Hand::from(hole), Hand::from(board)))
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
