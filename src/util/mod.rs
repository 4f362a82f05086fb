pub mod human;
pub mod palette;
pub mod report;
pub mod snapshot;
pub mod summary;
