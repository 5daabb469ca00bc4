use super::pot::Pot;
use super::settlement::Settlement;
use super::winner::Winner;
use crate::Chips;

/// Ephemeral pass that pays out every pot of a finished hand.
///
/// Settlements arrive in seat order starting after the dealer, so the
/// first tied winner of a pot is the one that takes its odd chips.
/// Rake comes off the main pot first, then the side pots in order.
/// An uncalled excess goes back to its owner without a winner entry.
pub struct Showdown {
    settlements: Vec<Settlement>,
    pots: Vec<Pot>,
    rake: Chips,
}

impl From<(Vec<Settlement>, Vec<Pot>, Chips)> for Showdown {
    fn from((settlements, pots, rake): (Vec<Settlement>, Vec<Pot>, Chips)) -> Self {
        Self {
            settlements,
            pots,
            rake,
        }
    }
}

impl Showdown {
    pub fn settle(mut self) -> (Vec<Settlement>, Vec<Winner>) {
        let mut winners = Vec::new();
        let pots = std::mem::take(&mut self.pots);
        for pot in pots {
            let cut = std::cmp::min(self.rake, pot.amount);
            self.rake -= cut;
            let amount = pot.amount - cut;
            if amount == 0 {
                continue;
            }
            let refund = pot.eligible.len() == 1 && self.n_contenders() > 1;
            let claimants = self.claimants(&pot);
            let best = self.best(&claimants);
            let share = amount / best.len() as Chips;
            let extra = amount % best.len() as Chips;
            for (i, index) in best.into_iter().enumerate() {
                let won = if i == 0 { share + extra } else { share };
                let settlement = &mut self.settlements[index];
                settlement.reward += won;
                if !refund {
                    winners.push(Self::winner(settlement, won));
                }
            }
        }
        (self.settlements, winners)
    }

    fn n_contenders(&self) -> usize {
        self.settlements.iter().filter(|s| s.is_contender()).count()
    }
    /// contenders eligible for the pot
    fn claimants(&self, pot: &Pot) -> Vec<usize> {
        let contenders = self
            .settlements
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_contender())
            .map(|(i, _)| i)
            .collect::<Vec<usize>>();
        let eligible = contenders
            .iter()
            .copied()
            .filter(|i| pot.eligible.contains(&self.settlements[*i].position))
            .collect::<Vec<usize>>();
        match eligible.is_empty() {
            true => contenders,
            false => eligible,
        }
    }
    /// the claimants holding the best evaluated hand,
    /// or every claimant when nobody had to show
    fn best(&self, claimants: &[usize]) -> Vec<usize> {
        let strongest = claimants
            .iter()
            .filter_map(|i| self.settlements[*i].evaluation.as_ref())
            .map(|e| e.strength())
            .max();
        match strongest {
            None => claimants.to_vec(),
            Some(strongest) => claimants
                .iter()
                .copied()
                .filter(|i| {
                    self.settlements[*i]
                        .evaluation
                        .as_ref()
                        .map(|e| e.strength() == strongest)
                        .unwrap_or(false)
                })
                .collect(),
        }
    }
    fn winner(settlement: &Settlement, amount: Chips) -> Winner {
        let (name, description) = match settlement.evaluation.as_ref() {
            Some(e) => (e.name().to_string(), e.description()),
            None => (
                crate::DEFAULT_WINNER.to_string(),
                crate::DEFAULT_WINNER.to_string(),
            ),
        };
        Winner {
            address: settlement.address.clone(),
            position: settlement.position,
            amount,
            cards: settlement.hole,
            name,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;
    use crate::cards::evaluation::Evaluation;
    use crate::cards::hand::Hand;
    use crate::cards::hole::Hole;
    use crate::gameplay::status::Status;

    const BOARD: &str = "7D 3C TC 6D 8H";

    fn settlement(position: usize, hole: &str, risked: Chips, status: Status) -> Settlement {
        let cards = Vec::<Card>::from(Hand::try_from(hole).unwrap());
        let hole = Hole::from((cards[0], cards[1]));
        let board = Vec::<Card>::from(Hand::try_from(BOARD).unwrap());
        Settlement {
            position,
            address: format!("0x{}", position),
            status,
            hole: Some(hole),
            risked,
            reward: 0,
            evaluation: match status {
                Status::Showing => Some(Evaluation::from((hole, board.as_slice()))),
                _ => None,
            },
        }
    }

    #[test]
    fn best_hand_takes_the_pot() {
        let settlements = vec![
            settlement(1, "TD 5C", 40, Status::Showing),
            settlement(2, "5D 5H", 40, Status::Showing),
        ];
        let pots = vec![Pot {
            amount: 80,
            eligible: vec![1, 2],
        }];
        let (settlements, winners) = Showdown::from((settlements, pots, 0)).settle();
        assert_eq!(settlements[0].reward, 80);
        assert_eq!(settlements[1].reward, 0);
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].name, "Pair");
        assert_eq!(winners[0].description, "Pair, 10's");
    }

    #[test]
    fn odd_chip_goes_first_after_dealer() {
        let settlements = vec![
            settlement(3, "2S 4S", 30, Status::Showing),
            settlement(1, "2H 4H", 30, Status::Showing),
            settlement(2, "KS QS", 11, Status::Folded),
        ];
        let pots = vec![Pot {
            amount: 71,
            eligible: vec![1, 3],
        }];
        let (settlements, winners) = Showdown::from((settlements, pots, 0)).settle();
        assert_eq!(settlements[0].reward, 36);
        assert_eq!(settlements[1].reward, 35);
        assert_eq!(winners.len(), 2);
        assert_eq!(winners[0].position, 3);
    }

    #[test]
    fn side_pot_skips_the_short_stack() {
        let settlements = vec![
            settlement(1, "TD 5C", 50, Status::Showing),
            settlement(2, "5D 5H", 100, Status::Showing),
            settlement(3, "2C 4H", 100, Status::Showing),
        ];
        let pots = vec![
            Pot {
                amount: 150,
                eligible: vec![1, 2, 3],
            },
            Pot {
                amount: 100,
                eligible: vec![2, 3],
            },
        ];
        let (settlements, winners) = Showdown::from((settlements, pots, 0)).settle();
        assert_eq!(settlements[0].reward, 150);
        assert_eq!(settlements[1].reward, 100);
        assert_eq!(settlements[2].reward, 0);
        assert_eq!(winners.len(), 2);
    }

    #[test]
    fn uncalled_excess_is_returned_quietly() {
        let settlements = vec![
            settlement(1, "TD 5C", 50, Status::Showing),
            settlement(2, "5D 5H", 100, Status::Showing),
            settlement(3, "2C 4H", 150, Status::Showing),
        ];
        let pots = vec![
            Pot {
                amount: 150,
                eligible: vec![1, 2, 3],
            },
            Pot {
                amount: 100,
                eligible: vec![2, 3],
            },
            Pot {
                amount: 50,
                eligible: vec![3],
            },
        ];
        let (settlements, winners) = Showdown::from((settlements, pots, 0)).settle();
        assert_eq!(settlements[0].reward, 150);
        assert_eq!(settlements[1].reward, 100);
        assert_eq!(settlements[2].reward, 50);
        assert_eq!(winners.len(), 2);
        assert!(winners.iter().all(|w| w.position != 3));
    }

    #[test]
    fn default_winner_pays_rake() {
        let settlements = vec![
            settlement(1, "TD 5C", 20, Status::Folded),
            settlement(2, "5D 5H", 60, Status::Active),
        ];
        let pots = vec![Pot {
            amount: 80,
            eligible: vec![2],
        }];
        let (settlements, winners) = Showdown::from((settlements, pots, 4)).settle();
        assert_eq!(settlements[1].reward, 76);
        assert_eq!(winners[0].name, crate::DEFAULT_WINNER);
        assert_eq!(winners[0].description, crate::DEFAULT_WINNER);
    }
}
