use crate::Chips;
use crate::dto::ApiLegal;
use crate::dto::ApiPlayer;
use crate::dto::ApiTable;
use crate::gameplay::Action;
use crate::gameplay::ActionKind;
use crate::gameroom::*;
use dialoguer::Input;
use dialoguer::Select;

/// Terminal player. Prompts run on the blocking pool so the
/// room keeps its clock while the human thinks.
#[derive(Debug, Default, Clone, Copy)]
pub struct Human;

impl Human {
    fn label(legal: &ApiLegal) -> String {
        match (legal.min, legal.max) {
            (0, 0) => legal.action.to_string(),
            (min, max) if min == max => format!("{} {}", legal.action, min),
            (min, max) => format!("{} [{}, {}]", legal.action, min, max),
        }
    }
    fn amount(legal: &ApiLegal) -> anyhow::Result<Chips> {
        let (min, max) = (legal.min, legal.max);
        if min == max {
            return Ok(min);
        }
        let amount = Input::<String>::new()
            .with_prompt(format!("Amount [{}, {}]", min, max))
            .report(false)
            .validate_with(move |i: &String| -> Result<(), &str> {
                match i.parse::<Chips>() {
                    Ok(n) if n < min => Err("Amount too small"),
                    Ok(n) if n > max => Err("Amount too large"),
                    Ok(_) => Ok(()),
                    Err(_) => Err("Enter a NUMBER"),
                }
            })
            .interact()?;
        Ok(amount.parse::<Chips>()?)
    }
    fn prompt(table: &ApiTable, me: &ApiPlayer) -> anyhow::Result<Action> {
        let labels = me
            .legal_actions
            .iter()
            .map(Self::label)
            .collect::<Vec<String>>();
        let hole = me.hole_cards.clone().unwrap_or_default().join(" ");
        let board = table.community_cards.join(" ");
        let selection = Select::new()
            .with_prompt(format!("\nYOU HOLD {} | BOARD {}", hole, board))
            .report(false)
            .items(labels.as_slice())
            .default(0)
            .interact()?;
        let legal = me
            .legal_actions
            .get(selection)
            .ok_or_else(|| anyhow::anyhow!("selection out of range"))?;
        let amount = Self::amount(legal)?;
        Ok(Action::from_parts(legal.action, amount, me.seat))
    }
}

#[async_trait::async_trait]
impl Player for Human {
    async fn decide(&mut self, table: &ApiTable, me: &ApiPlayer) -> Action {
        let (table, me) = (table.clone(), me.clone());
        let fallback = match me.legal_actions.iter().any(|l| l.action == ActionKind::Check) {
            true => Action::Check,
            false => Action::Fold,
        };
        tokio::task::spawn_blocking(move || Self::prompt(&table, &me))
            .await
            .map_err(anyhow::Error::from)
            .and_then(|action| action)
            .inspect_err(|e| log::warn!("terminal input failed: {}", e))
            .unwrap_or(fallback)
    }

    async fn notify(&mut self, event: &Event) {
        match event {
            Event::Applied(record) => println!("{}", record),
            Event::Settled(winners) => winners.iter().for_each(|w| println!("{}", w)),
            Event::YourTurn(_) => {}
        }
    }
}
