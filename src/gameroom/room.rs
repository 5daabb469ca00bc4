use super::*;
use crate::Chips;
use crate::Position;
use crate::dto::Viewer;
use crate::dto::project;
use crate::gameplay::*;
use tokio::sync::mpsc::*;

/// Single writer for one table.
///
/// The room owns the Table and is the only place it is mutated. Requests
/// from every seat funnel through one command channel and are applied
/// strictly in arrival order, so the table never sees concurrent writes.
///
/// Each pass of the loop:
/// - starts the next hand, when autoplaying and the last one is settled
/// - prompts the seat whose turn it is, once per turn
/// - waits for a command, or for the turn clock to run out
///
/// A seat that lets its clock run out gets the passive action
/// (check, else fold; post the blind; show) and a tick on its timeout counter.
#[derive(Debug)]
pub struct Room {
    table: Table,
    channel: Channel<Command>,
    inboxes: Vec<(String, UnboundedSender<Event>)>,
    clock: Option<std::time::Duration>,
    hands: Option<u64>,
    prompted: Option<(Position, u64)>,
}

impl From<Table> for Room {
    fn from(table: Table) -> Self {
        Self {
            table,
            channel: Channel::default(),
            inboxes: Vec::new(),
            clock: None,
            hands: None,
            prompted: None,
        }
    }
}

impl Room {
    /// turn clock to use instead of the table's `timeout`
    pub fn with_clock(mut self, clock: std::time::Duration) -> Self {
        self.clock = Some(clock);
        self
    }
    /// start new hands unprompted, and stop after hand number `hands` settles
    pub fn with_hands(mut self, hands: u64) -> Self {
        self.hands = Some(hands);
        self
    }
    pub fn handle(&self) -> Handle {
        Handle::new(self.table.address().to_string(), self.channel.sender())
    }
    /// buy `player` into `position` and give it an actor
    pub fn sit<P>(&mut self, address: &str, position: Position, buy_in: Chips, player: P) -> anyhow::Result<()>
    where
        P: Player + 'static,
    {
        let request = Request::new(address, Action::Join(position, buy_in), self.table.next_index());
        self.apply(request)?;
        Actor::spawn(address.to_string(), Box::new(player), self.channel.sender());
        Ok(())
    }

    /// process commands until closed, or until autoplay runs out of hands.
    /// returns the final table.
    pub async fn run(mut self) -> Table {
        loop {
            if self.is_done() {
                break;
            }
            self.autoplay();
            self.prompt();
            match tokio::time::timeout(self.clock(), self.channel.recv()).await {
                Ok(Some(Command::Close)) | Ok(None) => break,
                Ok(Some(command)) => self.handle_command(command),
                Err(_) => self.expire(),
            }
        }
        log::info!("[table {}] room closed", self.table.address());
        self.table
    }
}

impl Room {
    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Submit(request, reply) => {
                let result = self.apply(request);
                let _ = reply.send(result);
            }
            Command::View(viewer, reply) => {
                let _ = reply.send(project(&self.table, &viewer));
            }
            Command::Subscribe(address, inbox) => {
                log::debug!("[table {}] {} subscribed", self.table.address(), address);
                self.inboxes.push((address, inbox));
                self.prompted = None;
            }
            Command::Close => {}
        }
    }

    /// requests that arrive unstamped are logged at their arrival time
    fn apply(&mut self, request: Request) -> Result<Receipt, Error> {
        let request = match request.timestamp {
            Some(_) => request,
            None => request.at(now()),
        };
        let before = self.table.round();
        let receipt = self.table.apply(request)?;
        self.announce(&receipt, before);
        Ok(receipt)
    }

    fn expire(&mut self) {
        let Some(position) = self.table.next_to_act() else {
            return;
        };
        let before = self.table.round();
        match self.table.expire(position, Some(now())) {
            Ok(receipt) => {
                log::info!("[table {}] seat {} timed out", self.table.address(), position);
                self.announce(&receipt, before);
            }
            Err(e) => log::warn!("[table {}] timeout for seat {}: {}", self.table.address(), position, e),
        }
    }

    fn autoplay(&mut self) {
        let Some(hands) = self.hands else {
            return;
        };
        if self.table.round() != Round::End || self.table.hand_number() >= hands {
            return;
        }
        let dealer = self
            .table
            .seats()
            .iter()
            .find(|s| {
                self.table
                    .legal(s.position())
                    .iter()
                    .any(|l| l.kind == ActionKind::NewHand)
            })
            .map(|s| s.address().to_string());
        if let Some(address) = dealer {
            let request = Request::new(address, Action::NewHand, self.table.next_index());
            if let Err(e) = self.apply(request) {
                log::warn!("[table {}] could not start a hand: {}", self.table.address(), e);
            }
        }
    }

    /// autoplay stops once a settled hand has nothing left to follow it
    fn is_done(&self) -> bool {
        match self.hands {
            None => false,
            Some(hands) => {
                self.table.round() == Round::End
                    && (self.table.hand_number() >= hands
                        || self.table.is_finished()
                        || self.table.seats().iter().all(|s| {
                            self.table
                                .legal(s.position())
                                .iter()
                                .all(|l| l.kind != ActionKind::NewHand)
                        }))
            }
        }
    }

    fn prompt(&mut self) {
        let Some(position) = self.table.next_to_act() else {
            return;
        };
        let turn = (position, self.table.next_index());
        if self.prompted == Some(turn) {
            return;
        }
        self.prompted = Some(turn);
        if let Some(seat) = self.table.seat(position) {
            let address = seat.address().to_string();
            let view = project(&self.table, &Viewer::Player(address.clone()));
            self.unicast(&address, Event::YourTurn(view));
        }
    }

    fn announce(&mut self, receipt: &Receipt, before: Round) {
        self.broadcast(Event::Applied(receipt.record.clone()));
        if before != Round::End && self.table.round() == Round::End {
            self.broadcast(Event::Settled(self.table.winners().to_vec()));
        }
    }
}

impl Room {
    fn unicast(&self, address: &str, event: Event) {
        self.inboxes
            .iter()
            .filter(|(a, _)| a == address)
            .map(|(_, inbox)| inbox.send(event.clone()))
            .filter_map(|res| res.err())
            .for_each(|e| log::warn!("failed unicast to {}: {:?}", address, e));
    }
    fn broadcast(&mut self, event: Event) {
        self.inboxes.retain(|(address, inbox)| match inbox.send(event.clone()) {
            Ok(()) => true,
            Err(_) => {
                log::warn!("dropping closed inbox of {}", address);
                false
            }
        });
    }
    fn clock(&self) -> std::time::Duration {
        self.clock
            .unwrap_or_else(|| std::time::Duration::from_secs(self.table.options().timeout))
    }
}

/// unix epoch milliseconds
fn now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::ApiPlayer;
    use crate::dto::ApiTable;

    const E16: Chips = 10_000_000_000_000_000;

    /// never answers, so every turn times out
    struct Sleeper;

    #[async_trait::async_trait]
    impl Player for Sleeper {
        async fn decide(&mut self, _: &ApiTable, _: &ApiPlayer) -> Action {
            std::future::pending::<Action>().await
        }
        async fn notify(&mut self, _: &Event) {}
    }

    fn table(format: Format) -> Table {
        Table::new("0xroom", format, Options::default())
            .unwrap()
            .with_seed(7)
    }

    #[tokio::test]
    async fn fish_play_out_hands() {
        let mut room = Room::from(table(Format::Cash))
            .with_clock(std::time::Duration::from_secs(5))
            .with_hands(5);
        room.sit("0xA", 1, 50 * E16, Fish).unwrap();
        room.sit("0xB", 4, 50 * E16, Fish).unwrap();
        room.sit("0xC", 7, 50 * E16, Fish).unwrap();
        let table = room.run().await;
        assert_eq!(table.round(), Round::End);
        assert_eq!(table.chips(), 150 * E16);
        assert!(table.check_deck().is_ok());
        assert!(table.ledger().records().iter().all(|r| r.timestamp.is_some()));
    }

    #[tokio::test]
    async fn sleepers_are_played_passively() {
        let mut room = Room::from(table(Format::Cash))
            .with_clock(std::time::Duration::from_millis(10))
            .with_hands(1);
        room.sit("0xA", 1, 50 * E16, Sleeper).unwrap();
        room.sit("0xB", 2, 50 * E16, Sleeper).unwrap();
        let table = room.run().await;
        assert_eq!(table.round(), Round::End);
        assert!(table.seats().iter().all(|s| s.timeout() > 0));
        assert!(table.ledger().records().iter().all(|r| r.timestamp.is_some()));
        assert_eq!(table.chips(), 100 * E16);
    }

    #[tokio::test]
    async fn handles_submit_and_view() {
        let room = Room::from(table(Format::Cash)).with_clock(std::time::Duration::from_secs(60));
        let handle = room.handle();
        let running = tokio::spawn(room.run());
        let mut events = handle.subscribe("0xA").unwrap();
        let receipt = handle
            .submit(Request::new("0xA", Action::Join(3, 50 * E16), 1))
            .await
            .unwrap();
        assert_eq!(receipt.record.index, 1);
        assert!(receipt.record.timestamp.is_some());
        let stamped = handle
            .submit(Request::new("0xA", Action::SitOut, 2).at(1_700_000_000_000))
            .await
            .unwrap();
        assert_eq!(stamped.record.timestamp, Some(1_700_000_000_000));
        let stale = handle
            .submit(Request::new("0xB", Action::Join(4, 50 * E16), 2))
            .await;
        assert!(matches!(
            stale.unwrap_err().downcast_ref::<Error>(),
            Some(Error::Stale { .. })
        ));
        match events.recv().await {
            Some(Event::Applied(record)) => assert_eq!(record.action, Action::Join(3, 50 * E16)),
            other => panic!("unexpected {:?}", other),
        }
        let view = handle.view(Viewer::Public).await.unwrap();
        assert_eq!(view.players.len(), 1);
        assert_eq!(view.action_count, 0);
        handle.close().unwrap();
        let table = running.await.unwrap();
        assert_eq!(table.seats().len(), 1);
    }
}
