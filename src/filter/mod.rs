pub mod criteria;
pub mod predicate;

pub use criteria::{FilterCriteria, RangeOp};
pub use predicate::{filter_products, matches};
