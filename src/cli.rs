pub mod ingredient;
pub mod migrate;
pub mod queue;
pub mod units;
pub mod worker;
