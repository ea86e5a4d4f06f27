mod de;
pub mod store;
pub mod types;
pub mod units;

pub use store::{Catalog, ScoreClass, ScoredProduct, SortOrder};
pub use types::{Connectivity, Flag, Product};
