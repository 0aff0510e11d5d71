pub mod stage_cache;
pub mod stage_tables;
