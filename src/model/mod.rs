pub mod record;
pub mod stats;

pub use record::Record;
pub use stats::{PlayerRollup, SummaryStats};
