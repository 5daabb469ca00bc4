use super::*;
use crate::gameplay::Format;
use crate::gameplay::Options;
use crate::gameplay::Table;
use std::collections::HashMap;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tokio::sync::RwLock;

/// Registry of running tables. Each table is its own Room task,
/// so tables share nothing but this map.
pub struct Lobby {
    tables: RwLock<HashMap<String, Handle>>,
    count: AtomicU64,
}

impl Default for Lobby {
    fn default() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            count: AtomicU64::new(1),
        }
    }
}

impl Lobby {
    /// Address for the next table, unique within this lobby.
    pub fn mint(&self) -> String {
        format!("0x{:040x}", self.count.fetch_add(1, Ordering::Relaxed))
    }

    /// Opens a new table and spawns its room.
    pub async fn open(&self, format: Format, options: Options) -> anyhow::Result<Handle> {
        let room = Room::from(Table::new(self.mint(), format, options)?);
        let handle = room.handle();
        self.host(room).await;
        Ok(handle)
    }

    /// Registers an already configured room and spawns it.
    /// The task yields the final table once the room stops.
    pub async fn host(&self, room: Room) -> tokio::task::JoinHandle<Table> {
        let handle = room.handle();
        let address = handle.address().to_string();
        self.tables.write().await.insert(address.clone(), handle);
        log::info!("hosting table {}", address);
        tokio::spawn(room.run())
    }

    pub async fn get(&self, address: &str) -> anyhow::Result<Handle> {
        self.tables
            .read()
            .await
            .get(address)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("table {} not found", address))
    }

    /// Closes a table and removes it from the lobby.
    /// A room that already stopped on its own is simply forgotten.
    pub async fn close(&self, address: &str) -> anyhow::Result<()> {
        let handle = self
            .tables
            .write()
            .await
            .remove(address)
            .ok_or_else(|| anyhow::anyhow!("table {} not found", address))?;
        match handle.close() {
            Ok(()) => log::info!("closed table {}", address),
            Err(_) => log::debug!("table {} had already stopped", address),
        }
        Ok(())
    }

    pub async fn addresses(&self) -> Vec<String> {
        let mut addresses = self.tables.read().await.keys().cloned().collect::<Vec<_>>();
        addresses.sort();
        addresses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::Viewer;
    use crate::gameplay::Action;
    use crate::gameplay::Request;

    #[tokio::test]
    async fn tables_are_independent() {
        let lobby = Lobby::default();
        let a = lobby.open(Format::Cash, Options::default()).await.unwrap();
        let b = lobby.open(Format::SitAndGo, Options::default()).await.unwrap();
        assert_ne!(a.address(), b.address());
        let buy_in = Options::default().min_buy_in;
        a.submit(Request::new("0xA", Action::Join(1, buy_in), 1))
            .await
            .unwrap();
        assert_eq!(a.view(Viewer::Public).await.unwrap().players.len(), 1);
        assert_eq!(b.view(Viewer::Public).await.unwrap().players.len(), 0);
        assert_eq!(lobby.addresses().await.len(), 2);
        lobby.close(a.address()).await.unwrap();
        assert!(lobby.get(a.address()).await.is_err());
        assert!(lobby.get(b.address()).await.is_ok());
    }

    #[tokio::test]
    async fn hosted_rooms_hand_back_their_table() {
        let lobby = Lobby::default();
        let address = lobby.mint();
        let table = Table::new(address.clone(), Format::Cash, Options::default())
            .unwrap()
            .with_seed(3);
        let mut room = Room::from(table)
            .with_clock(std::time::Duration::from_secs(5))
            .with_hands(2);
        let buy_in = Options::default().min_buy_in;
        room.sit("0xA", 1, buy_in, Fish).unwrap();
        room.sit("0xB", 2, buy_in, Fish).unwrap();
        let running = lobby.host(room).await;
        assert!(lobby.get(&address).await.is_ok());
        let table = running.await.unwrap();
        assert_eq!(table.address(), address);
        assert_eq!(table.chips(), 2 * buy_in);
        lobby.close(&address).await.unwrap();
        assert!(lobby.addresses().await.is_empty());
        assert!(lobby.close(&address).await.is_err());
    }
}
