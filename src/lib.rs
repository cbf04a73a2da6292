pub mod calendar;
pub mod cli;
pub mod data;
pub mod error;
pub mod fees;
pub mod journal;
pub mod metrics;
pub mod report;
pub mod util;

pub use error::JournalError;
pub use fees::{CompleteTradeFees, FeeBreakdown, FeeCalculator, FeesConfig, LegFees};
pub use journal::{Trade, TradeStatus};
