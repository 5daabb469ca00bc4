use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Coupled sender/receiver pair owned by the receiving task.
/// Senders are handed out by cloning; the receiver never leaves.
#[derive(Debug)]
pub struct Channel<T> {
    tx: UnboundedSender<T>,
    rx: UnboundedReceiver<T>,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        let (tx, rx) = unbounded_channel();
        Self { tx, rx }
    }
}

impl<T> Channel<T> {
    /// a new sending end for another task
    pub fn sender(&self) -> UnboundedSender<T> {
        self.tx.clone()
    }
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}
