//! Pattern chains for each part of a tournament summary export.

pub mod buy_in;
pub mod entries;
pub mod header;
pub mod matcher;
pub mod outcome;
pub mod phase;
pub mod summary;
