pub mod color;
pub mod ledger;

pub use color::Color;
pub use ledger::{Faction, FactionLedger, FactionSnapshot};
