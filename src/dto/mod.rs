pub mod amount;

pub mod document;
pub use document::*;

pub mod view;
pub use view::*;
