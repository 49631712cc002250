pub mod datetime;
pub mod filter;
pub mod insights;
pub mod reconcile;
pub mod task;
