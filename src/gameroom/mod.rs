mod actor;
mod channel;
mod command;
mod event;
mod handle;
mod lobby;
mod player;
mod players;
mod room;

pub use actor::*;
pub use channel::*;
pub use command::*;
pub use event::*;
pub use handle::*;
pub use lobby::*;
pub use player::*;
pub use players::*;
pub use room::*;
