//! Errors internal to the lag filters.
//!
//! None of these escape the public filtering entry point; a filter always
//! returns a (possibly empty) list.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A mean was requested over zero tablets.
    #[error("mean over an empty tablet list")]
    EmptyList,
}
