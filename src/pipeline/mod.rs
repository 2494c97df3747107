pub mod consensus;
pub mod query;
pub mod report;
pub mod silence;
