pub mod error;
pub mod filter;
pub mod index;
pub mod similarity;
pub mod stats;
pub mod store;
pub mod types;
pub mod validate;

pub use error::{IndexError, IndexResult};
pub use filter::MetadataFilter;
pub use stats::{IndexStats, ResultStats};
pub use store::{BatchOutcome, SearchReport, SimilarityIndex};
pub use types::*;
