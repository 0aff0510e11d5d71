pub mod date_filter_column;
pub mod stage_label;
