use crate::dto::ApiTable;
use crate::gameplay::Record;
use crate::gameplay::Winner;

/// Events a room pushes to its subscribers.
#[derive(Clone, Debug)]
pub enum Event {
    /// broadcast for every accepted action
    Applied(Record),
    /// broadcast when a hand is paid out
    Settled(Vec<Winner>),
    /// unicast to the seat that must act, rendered for that seat
    YourTurn(ApiTable),
}
