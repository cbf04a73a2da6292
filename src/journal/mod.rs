pub mod exits;
pub mod types;

pub use exits::{exit_position, ExitOutcome};
pub use types::{Trade, TradeStatus};
