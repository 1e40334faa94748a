pub mod records;
pub mod tracker;
