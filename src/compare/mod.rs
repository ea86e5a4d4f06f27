pub mod selection;
pub mod table;

pub use selection::{ComparisonSelection, SelectionError, MAX_COMPARED};
pub use table::{comparison_rows, format_price, Cell, Characteristic, ComparisonRow};
