use super::event::Event;
use crate::dto::ApiPlayer;
use crate::dto::ApiTable;
use crate::gameplay::Action;

/// Anything that can occupy a seat: a bot, a terminal, a socket.
///
/// Rooms never call players directly. An [`super::Actor`] owns the player
/// in its own task, so a slow decision blocks nobody but that seat, and
/// the room's clock keeps running regardless.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Choose from `me.legal_actions`, given the table as `me` sees it.
    async fn decide(&mut self, table: &ApiTable, me: &ApiPlayer) -> Action;

    /// Observe table events. Not needed for deciding.
    async fn notify(&mut self, event: &Event);
}
