pub mod formatter;

pub use formatter::{
    format_cards, format_comparison_table, format_json, format_product_detail, format_profiles,
    format_score_bar, format_tsv, should_use_colors, NO_RESULTS,
};
