pub mod aggregate;
pub mod badges;
pub mod delimited;
pub mod error;
pub mod export;
pub mod format;
pub mod model;
pub mod normalize;
pub mod source;
pub mod view;
pub mod xlsx;

pub use error::{ReplayError, Result};
pub use model::*;
pub use source::{load_dataset, Dataset, LoadConfig};
