pub mod alloc;
pub mod plan;
pub mod savings;
pub mod setup;
pub mod summary;
pub mod ui;
