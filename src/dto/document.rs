use crate::Chips;
use crate::Position;
use crate::gameplay::Action;
use crate::gameplay::ActionKind;
use crate::gameplay::Format;
use crate::gameplay::Legal;
use crate::gameplay::Options;
use crate::gameplay::Placement;
use crate::gameplay::Rake;
use crate::gameplay::Record;
use crate::gameplay::Round;
use crate::gameplay::Status;
use serde::Deserialize;
use serde::Serialize;

/// The table-state document, as emitted to and read back from clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTable {
    #[serde(rename = "type")]
    pub format: Format,
    pub address: String,
    pub game_options: ApiOptions,
    pub small_blind_position: Position,
    pub big_blind_position: Position,
    pub dealer: Position,
    pub players: Vec<ApiPlayer>,
    pub community_cards: Vec<String>,
    pub deck: String,
    #[serde(with = "super::amount::list")]
    pub pots: Vec<Chips>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_acted_seat: Option<Position>,
    pub action_count: u64,
    pub hand_number: u64,
    pub next_to_act: i64,
    pub previous_actions: Vec<ApiRecord>,
    pub round: Round,
    #[serde(default)]
    pub winners: Vec<ApiWinner>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<ApiResult>,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOptions {
    #[serde(with = "super::amount")]
    pub min_buy_in: Chips,
    #[serde(with = "super::amount")]
    pub max_buy_in: Chips,
    pub max_players: usize,
    pub min_players: usize,
    #[serde(with = "super::amount")]
    pub small_blind: Chips,
    #[serde(with = "super::amount")]
    pub big_blind: Chips,
    pub timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rake: Option<ApiRake>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRake {
    #[serde(with = "super::amount")]
    pub free_threshold: Chips,
    pub percentage: u32,
    #[serde(with = "super::amount")]
    pub cap: Chips,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPlayer {
    pub address: String,
    pub seat: Position,
    #[serde(with = "super::amount")]
    pub stack: Chips,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
    pub is_dealer: bool,
    /// absent when the seat was never dealt in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hole_cards: Option<Vec<String>>,
    pub status: Status,
    pub legal_actions: Vec<ApiLegal>,
    #[serde(with = "super::amount")]
    pub sum_of_bets: Chips,
    pub timeout: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_action: Option<ApiRecord>,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiLegal {
    pub action: ActionKind,
    #[serde(with = "super::amount")]
    pub min: Chips,
    #[serde(with = "super::amount")]
    pub max: Chips,
    pub index: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRecord {
    pub player_id: String,
    pub seat: Position,
    pub action: ActionKind,
    #[serde(with = "super::amount::optional")]
    pub amount: Option<Chips>,
    pub round: Round,
    pub index: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiWinner {
    pub address: String,
    #[serde(with = "super::amount")]
    pub amount: Chips,
    #[serde(default)]
    pub cards: Vec<String>,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult {
    pub place: usize,
    pub player_id: String,
    #[serde(with = "super::amount")]
    pub payout: Chips,
}

impl From<&Options> for ApiOptions {
    fn from(options: &Options) -> Self {
        Self {
            min_buy_in: options.min_buy_in,
            max_buy_in: options.max_buy_in,
            max_players: options.max_players,
            min_players: options.min_players,
            small_blind: options.small_blind,
            big_blind: options.big_blind,
            timeout: options.timeout,
            rake: options.rake.as_ref().map(|rake| ApiRake {
                free_threshold: rake.free_threshold,
                percentage: rake.percentage,
                cap: rake.cap,
                owner: rake.owner.clone(),
            }),
        }
    }
}

impl From<ApiOptions> for Options {
    fn from(options: ApiOptions) -> Self {
        Self {
            min_buy_in: options.min_buy_in,
            max_buy_in: options.max_buy_in,
            min_players: options.min_players,
            max_players: options.max_players,
            small_blind: options.small_blind,
            big_blind: options.big_blind,
            timeout: options.timeout,
            rake: options.rake.map(|rake| Rake {
                free_threshold: rake.free_threshold,
                percentage: rake.percentage,
                cap: rake.cap,
                owner: rake.owner,
            }),
        }
    }
}

impl From<&Legal> for ApiLegal {
    fn from(legal: &Legal) -> Self {
        Self {
            action: legal.kind,
            min: legal.min,
            max: legal.max,
            index: legal.index,
        }
    }
}

impl From<&Record> for ApiRecord {
    fn from(record: &Record) -> Self {
        Self {
            player_id: record.address.clone(),
            seat: record.seat,
            action: record.action.kind(),
            amount: match record.action.kind().is_monetary() {
                true => Some(record.action.amount()),
                false => None,
            },
            round: record.round,
            index: record.index,
            timestamp: record.timestamp,
        }
    }
}

impl From<ApiRecord> for Record {
    fn from(record: ApiRecord) -> Self {
        Self {
            action: Action::from_parts(record.action, record.amount.unwrap_or(0), record.seat),
            address: record.player_id,
            seat: record.seat,
            round: record.round,
            index: record.index,
            timestamp: record.timestamp,
        }
    }
}

impl From<&Placement> for ApiResult {
    fn from(placement: &Placement) -> Self {
        Self {
            place: placement.place,
            player_id: placement.address.clone(),
            payout: placement.payout,
        }
    }
}

impl From<ApiResult> for Placement {
    fn from(result: ApiResult) -> Self {
        Self {
            place: result.place,
            address: result.player_id,
            payout: result.payout,
        }
    }
}
