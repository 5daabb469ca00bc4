mod fish;
mod human;

pub use fish::*;
pub use human::*;
