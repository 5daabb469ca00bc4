use super::*;
use crate::dto::ApiTable;
use crate::dto::Viewer;
use crate::gameplay::Receipt;
use crate::gameplay::Request;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

/// Cloneable front door to a running room.
/// Every call becomes a Command on the room's channel.
#[derive(Debug, Clone)]
pub struct Handle {
    address: String,
    sender: UnboundedSender<Command>,
}

impl Handle {
    pub fn new(address: String, sender: UnboundedSender<Command>) -> Self {
        Self { address, sender }
    }
    pub fn address(&self) -> &str {
        &self.address
    }

    /// apply one request. engine rejections come back as a
    /// `gameplay::Error` inside the `anyhow::Error`.
    pub async fn submit(&self, request: Request) -> anyhow::Result<Receipt> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Submit(request, tx))?;
        Ok(rx.await??)
    }
    pub async fn view(&self, viewer: Viewer) -> anyhow::Result<ApiTable> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::View(viewer, tx))?;
        Ok(rx.await?)
    }
    pub fn subscribe(&self, address: &str) -> anyhow::Result<UnboundedReceiver<Event>> {
        let (tx, rx) = unbounded_channel();
        self.send(Command::Subscribe(address.to_string(), tx))?;
        Ok(rx)
    }
    /// attach a player to an already seated address
    pub fn sit<P>(&self, address: &str, player: P)
    where
        P: Player + 'static,
    {
        Actor::spawn(address.to_string(), Box::new(player), self.sender.clone());
    }
    pub fn close(&self) -> anyhow::Result<()> {
        self.send(Command::Close)
    }

    fn send(&self, command: Command) -> anyhow::Result<()> {
        self.sender
            .send(command)
            .map_err(|_| anyhow::anyhow!("table {} is closed", self.address))
    }
}
