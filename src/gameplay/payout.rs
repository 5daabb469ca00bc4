use crate::Chips;

/// Prize pool of an elimination table: every entrant's minimum buy-in,
/// paid out to the top places by fixed percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payouts {
    pool: Chips,
}

impl Payouts {
    pub fn new(min_buy_in: Chips, entrants: usize) -> Self {
        Self {
            pool: min_buy_in * entrants as Chips,
        }
    }
    pub fn pool(&self) -> Chips {
        self.pool
    }
    /// prize for a 1-based place, zero outside the paid places
    pub fn at(&self, place: usize) -> Chips {
        match place {
            0 => 0,
            n => crate::PAYOUT_SHARES
                .get(n - 1)
                .map(|share| self.pool * share / 100)
                .unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixty_thirty_ten() {
        let payouts = Payouts::new(1_000, 6);
        assert_eq!(payouts.pool(), 6_000);
        assert_eq!(payouts.at(1), 3_600);
        assert_eq!(payouts.at(2), 1_800);
        assert_eq!(payouts.at(3), 600);
        assert_eq!(payouts.at(4), 0);
        assert_eq!(payouts.at(0), 0);
    }
}
