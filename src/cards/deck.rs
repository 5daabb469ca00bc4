use super::card::Card;
use super::hand::Hand;
use rand::Rng;
use rand::seq::SliceRandom;

/// An ordered 52 card deck with a cursor.
///
/// Cards before the cursor have been drawn (dealt or burned), the card at
/// the cursor is the next one out. Serialized as hyphen-joined tokens with
/// the cursor card in brackets, e.g. `"2C-3C-[4C]-5C-..."`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    /// sorted, nothing drawn
    pub fn new() -> Self {
        Self {
            cards: Card::all().collect(),
            cursor: 0,
        }
    }
    /// uniformly random permutation, nothing drawn
    pub fn shuffled(rng: &mut impl Rng) -> Self {
        let mut deck = Self::new();
        deck.cards.shuffle(rng);
        deck
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }
    /// cards already taken off the top
    pub fn drawn(&self) -> &[Card] {
        &self.cards[..self.cursor]
    }
    /// cards still to come
    pub fn undrawn(&self) -> &[Card] {
        &self.cards[self.cursor..]
    }

    /// take `n` cards off the top
    pub fn draw(&mut self, n: usize) -> anyhow::Result<Vec<Card>> {
        if n > self.remaining() {
            return Err(anyhow::anyhow!(
                "deck exhausted: wanted {}, {} left",
                n,
                self.remaining()
            ));
        }
        let cards = self.cards[self.cursor..self.cursor + n].to_vec();
        self.cursor += n;
        Ok(cards)
    }
    /// discard the top card
    pub fn burn(&mut self) -> anyhow::Result<Card> {
        self.draw(1)?
            .pop()
            .ok_or_else(|| anyhow::anyhow!("deck exhausted on burn"))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// str isomorphism
/// exactly 52 distinct tokens and at most one bracket.
/// no bracket means every card is drawn.
impl TryFrom<&str> for Deck {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut cursor = None;
        let mut cards = Vec::with_capacity(52);
        for (i, token) in s.trim().split('-').enumerate() {
            let token = token.trim();
            let inner = match token.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
                Some(inner) if cursor.is_none() => {
                    cursor = Some(i);
                    inner
                }
                Some(_) => return Err(anyhow::anyhow!("deck has more than one marker")),
                None => token,
            };
            cards.push(Card::try_from(inner)?);
        }
        if cards.len() != 52 || Hand::from(cards.as_slice()).size() != 52 {
            return Err(anyhow::anyhow!("deck must hold 52 distinct cards"));
        }
        Ok(Self {
            cursor: cursor.unwrap_or(cards.len()),
            cards,
        })
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let tokens = self
            .cards
            .iter()
            .enumerate()
            .map(|(i, c)| match i == self.cursor {
                true => format!("[{}]", c),
                false => c.to_string(),
            })
            .collect::<Vec<String>>();
        write!(f, "{}", tokens.join("-"))
    }
}
