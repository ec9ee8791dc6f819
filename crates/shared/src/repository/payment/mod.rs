pub mod command;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod query;
mod row;
