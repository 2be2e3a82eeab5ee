//! Pagination strategies
//!
//! One tagged capability over the three vendor conventions the adapter
//! supports, plus the page request/result types. See
//! [`strategies`] for the individual algorithms.

mod strategies;
mod types;

pub use strategies::{CursorToken, HeaderTotal, OffsetLimit, OffsetMode, PageStrategy};
pub use types::{PageRequest, PageResult, RawPage, DEFAULT_PAGE_SIZE};

#[cfg(test)]
mod tests;
