pub mod formatter;

pub use formatter::{
    format_matched_table, format_matched_tsv, format_ratio, format_top_table, format_top_tsv,
    render_json, should_use_colors,
};
