use super::card::Card;
use super::hand::Hand;

/// The two private cards dealt to a seat, in the order they were dealt.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct Hole([Card; 2]);

impl Hole {
    pub fn cards(&self) -> [Card; 2] {
        self.0
    }
}

impl From<(Card, Card)> for Hole {
    fn from((a, b): (Card, Card)) -> Self {
        Self([a, b])
    }
}
impl From<Hole> for Hand {
    fn from(hole: Hole) -> Self {
        Hand::from(hole.0.as_slice())
    }
}

/// str isomorphism, two tokens
impl TryFrom<&[String]> for Hole {
    type Error = anyhow::Error;
    fn try_from(tokens: &[String]) -> Result<Self, Self::Error> {
        match tokens {
            [a, b] => {
                let a = Card::try_from(a.as_str())?;
                let b = Card::try_from(b.as_str())?;
                if a == b {
                    Err(anyhow::anyhow!("hole repeats {}", a))
                } else {
                    Ok(Self::from((a, b)))
                }
            }
            _ => Err(anyhow::anyhow!("hole needs 2 cards, got {}", tokens.len())),
        }
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {}", self.0[0], self.0[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_deal_order() {
        let tokens = vec!["TD".to_string(), "5C".to_string()];
        let hole = Hole::try_from(tokens.as_slice()).unwrap();
        assert_eq!(hole.to_string(), "TD 5C");
        assert_eq!(Hand::from(hole).size(), 2);
    }

    #[test]
    fn rejects_pairs_of_one_card() {
        let tokens = vec!["TD".to_string(), "TD".to_string()];
        assert!(Hole::try_from(tokens.as_slice()).is_err());
        let tokens = vec!["TD".to_string()];
        assert!(Hole::try_from(tokens.as_slice()).is_err());
    }
}
