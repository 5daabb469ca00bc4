use super::rank::Rank;

/// A hand's kicker ranks, as a u16 rank mask.
///
/// Kicker sets of the same size compare correctly as integers:
/// the highest differing rank decides.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Kickers(u16);

/// u16 isomorphism
impl From<Kickers> for u16 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}
impl From<u16> for Kickers {
    fn from(n: u16) -> Self {
        Self(n)
    }
}

/// Vec<Rank> isomorphism, highest first
impl From<Kickers> for Vec<Rank> {
    fn from(k: Kickers) -> Self {
        (0..13u8)
            .rev()
            .filter(|i| k.0 & (1 << i) != 0)
            .map(Rank::from)
            .collect()
    }
}
impl From<Vec<Rank>> for Kickers {
    fn from(ranks: Vec<Rank>) -> Self {
        Self(ranks.iter().map(|r| u16::from(*r)).fold(0u16, |a, b| a | b))
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in Vec::<Rank>::from(*self) {
            write!(f, "{} ", rank)?;
        }
        Ok(())
    }
}
