pub mod action;
pub use action::*;

pub mod error;
pub use error::*;

pub mod ledger;
pub use ledger::*;

pub mod legal;
pub use legal::*;

pub mod options;
pub use options::*;

pub mod payout;
pub use payout::*;

pub mod pot;
pub use pot::*;

pub mod record;
pub use record::*;

pub mod request;
pub use request::*;

pub mod round;
pub use round::*;

pub mod seat;
pub use seat::*;

pub mod settlement;
pub use settlement::*;

pub mod showdown;
pub use showdown::*;

pub mod status;
pub use status::*;

pub mod table;
pub use table::*;

pub mod winner;
pub use winner::*;
