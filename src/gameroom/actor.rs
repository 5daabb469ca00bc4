use super::*;
use crate::gameplay::Request;
use tokio::sync::mpsc::*;
use tokio::sync::oneshot;

/// Runs a Player in its own task, bridging it to a room.
///
/// - Room unicasts YourTurn with the table as this seat sees it
/// - Actor asks Player::decide and submits the answer as a Request
/// - Everything else is forwarded to Player::notify
pub struct Actor {
    address: String,
    player: Box<dyn Player>,
    getter: UnboundedReceiver<Event>,
    sender: UnboundedSender<Command>,
}

impl Actor {
    /// spawn the actor and subscribe it to the room behind `sender`
    pub fn spawn(address: String, player: Box<dyn Player>, sender: UnboundedSender<Command>) {
        let (tx, rx) = unbounded_channel();
        if sender.send(Command::Subscribe(address.clone(), tx)).is_err() {
            log::warn!("room closed before {} could sit", address);
            return;
        }
        let actor = Self {
            address,
            player,
            sender,
            getter: rx,
        };
        tokio::spawn(actor.run());
    }
    async fn run(mut self) {
        while let Some(event) = self.getter.recv().await {
            match event {
                Event::YourTurn(ref table) => self.act(table).await,
                ref event => self.player.notify(event).await,
            }
        }
    }
    async fn act(&mut self, table: &crate::dto::ApiTable) {
        let Some(me) = table.players.iter().find(|p| p.address == self.address) else {
            return;
        };
        let Some(index) = me.legal_actions.first().map(|l| l.index) else {
            return;
        };
        let action = self.player.decide(table, me).await;
        let (tx, rx) = oneshot::channel();
        let request = Request::new(self.address.clone(), action, index);
        if self.sender.send(Command::Submit(request, tx)).is_err() {
            return;
        }
        match rx.await {
            Ok(Err(e)) => log::warn!("{} submitted {}: {}", self.address, action, e),
            Ok(Ok(_)) | Err(_) => {}
        }
    }
}
