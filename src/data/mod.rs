pub mod loader;
pub mod types;

pub use loader::{load_fees_config, load_trades};
pub use types::TradeRecord;
