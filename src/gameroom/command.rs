use super::event::Event;
use crate::dto::ApiTable;
use crate::dto::Viewer;
use crate::gameplay::Error;
use crate::gameplay::Receipt;
use crate::gameplay::Request;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;

/// Everything a room accepts from outside, each with its reply slot.
/// Commands are handled one at a time in arrival order.
#[derive(Debug)]
pub enum Command {
    Submit(Request, oneshot::Sender<Result<Receipt, Error>>),
    View(Viewer, oneshot::Sender<ApiTable>),
    /// deliver events for `address` to a new inbox
    Subscribe(String, UnboundedSender<Event>),
    Close,
}
