use crate::dto::ApiLegal;
use crate::dto::ApiPlayer;
use crate::dto::ApiTable;
use crate::gameplay::Action;
use crate::gameplay::ActionKind;
use crate::gameroom::*;
use rand::Rng;
use rand::seq::IndexedRandom;

/// CPU player that picks a weighted random legal action
/// and a uniform amount within its bounds.
#[derive(Debug, Default, Clone, Copy)]
pub struct Fish;

impl Fish {
    fn weight(legal: &ApiLegal) -> u32 {
        match legal.action {
            ActionKind::Fold => 15,
            ActionKind::Check => 10,
            ActionKind::Call => 40,
            ActionKind::Bet | ActionKind::Raise => 5,
            ActionKind::AllIn => 1,
            ActionKind::PostSmallBlind
            | ActionKind::PostBigBlind
            | ActionKind::Deal
            | ActionKind::Show
            | ActionKind::Muck => 1,
            _ => 0,
        }
    }
}

#[async_trait::async_trait]
impl Player for Fish {
    async fn decide(&mut self, _: &ApiTable, me: &ApiPlayer) -> Action {
        let ref mut rng = rand::rng();
        let choices = me
            .legal_actions
            .iter()
            .filter(|l| Self::weight(l) > 0)
            .collect::<Vec<&ApiLegal>>();
        match choices.choose_weighted(rng, |l| Self::weight(l)) {
            Ok(legal) => {
                let amount = match legal.min < legal.max {
                    true => rng.random_range(legal.min..=legal.max),
                    false => legal.min,
                };
                Action::from_parts(legal.action, amount, me.seat)
            }
            Err(_) => Action::Fold,
        }
    }

    async fn notify(&mut self, _: &Event) {}
}
