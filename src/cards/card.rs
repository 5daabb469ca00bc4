use super::rank::Rank;
use super::suit::Suit;

/// A single card, stored as its index in a sorted deck.
/// rank * 4 + suit, so 2C is 0 and AS is 51.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(u8);

impl Card {
    pub fn rank(&self) -> Rank {
        Rank::from(self.0 / 4)
    }
    pub fn suit(&self) -> Suit {
        Suit::from(self.0 % 4)
    }
    /// the full 52 card set, sorted
    pub fn all() -> impl Iterator<Item = Card> {
        (0..52u8).map(Card)
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((r, s): (Rank, Suit)) -> Self {
        Self(u8::from(r) * 4 + u8::from(s))
    }
}

/// u8 isomorphism
/// each card is mapped to its location in a sorted deck 0-51
/// TS
/// 35
/// 0b00100011
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        c.0
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self(n % 52)
    }
}

/// u64 isomorphism
/// each card is just one bit turned on
/// TS
/// xxxxxxxxxxxx 0000000000000000100000000000000000000000000000000000
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << c.0
    }
}
impl From<u64> for Card {
    fn from(n: u64) -> Self {
        Self(n.trailing_zeros() as u8)
    }
}

/// str isomorphism
/// two characters, rank then suit. "10" is accepted for ten.
impl TryFrom<&str> for Card {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let s = s.trim();
        let split = s
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .filter(|i| *i > 0)
            .ok_or_else(|| anyhow::anyhow!("invalid card {:?}", s))?;
        let rank = Rank::try_from(&s[..split])?;
        let suit = Suit::try_from(&s[split..])?;
        Ok(Card::from((rank, suit)))
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        for card in Card::all() {
            assert_eq!(card, Card::from(u8::from(card)));
        }
    }

    #[test]
    fn bijective_u64() {
        for card in Card::all() {
            assert_eq!(card, Card::from(u64::from(card)));
        }
    }

    #[test]
    fn tokens() {
        let card = Card::try_from("TD").unwrap();
        assert_eq!(card.rank(), Rank::Ten);
        assert_eq!(card.suit(), Suit::D);
        assert_eq!(card.to_string(), "TD");
        assert_eq!(Card::try_from("10d").unwrap(), card);
        assert_eq!(Card::try_from("kh").unwrap().to_string(), "KH");
        assert!(Card::try_from("??").is_err());
        assert!(Card::try_from("K").is_err());
        assert!(Card::try_from("").is_err());
    }
}
