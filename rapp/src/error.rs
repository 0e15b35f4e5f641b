//! Error taxonomy for the RAPP compute layer.
//!
//! Every public entry point validates its arguments through a common
//! prologue (see [`crate::state`] and the `check_*` helpers scattered
//! through the operation modules) before doing any real work. The
//! prologue can only fail in a small, closed set of ways, enumerated
//! here. Once past it, kernels are infallible: they never branch on
//! pixel *data* for error reasons.

use std::fmt;

/// A validation failure detected by an API-boundary prologue.
///
/// The in-process Rust API reports failures as this enum; [`RappError::code`]
/// exposes the matching negative `i32` for the C shell in [`crate::ffi`],
/// which has no richer error type to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RappError {
    /// A required pointer/slice argument was null or empty.
    NullPointer,
    /// A buffer base address or row stride was not aligned to
    /// [`crate::alloc::ALIGNMENT`].
    Unaligned,
    /// Width or height was negative, zero where disallowed, or
    /// otherwise out of the supported range.
    BadSize,
    /// A scalar parameter (threshold, bit offset, radius, ...) was
    /// outside its valid range.
    BadParameter,
    /// Two buffers that must be disjoint overlap in memory.
    Overlap,
    /// A compute call was made before [`crate::state::initialize`] or
    /// after [`crate::state::terminate`].
    NotInitialized,
    /// The caller-supplied scratch/work buffer was smaller than
    /// [`crate::morph::worksize_bin`] requires.
    WorkBufferTooSmall,
}

impl RappError {
    /// The stable negative numeric code for this error, as returned by
    /// the C entry points in [`crate::ffi`].
    pub const fn code(self) -> i32 {
        match self {
            RappError::NullPointer => -1,
            RappError::Unaligned => -2,
            RappError::BadSize => -3,
            RappError::BadParameter => -4,
            RappError::Overlap => -5,
            RappError::NotInitialized => -6,
            RappError::WorkBufferTooSmall => -7,
        }
    }

    /// Recover an error from its numeric code, the inverse of
    /// [`RappError::code`]. Returns `None` for `0` or any unrecognised
    /// negative value.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(RappError::NullPointer),
            -2 => Some(RappError::Unaligned),
            -3 => Some(RappError::BadSize),
            -4 => Some(RappError::BadParameter),
            -5 => Some(RappError::Overlap),
            -6 => Some(RappError::NotInitialized),
            -7 => Some(RappError::WorkBufferTooSmall),
            _ => None,
        }
    }

    /// A human-readable, stable description, mirrored by the C-level
    /// string lookup in [`crate::ffi`].
    pub const fn describe(self) -> &'static str {
        match self {
            RappError::NullPointer => "null pointer argument",
            RappError::Unaligned => "unaligned pointer or row stride",
            RappError::BadSize => "width or height out of range",
            RappError::BadParameter => "scalar parameter out of range",
            RappError::Overlap => "buffers that must be disjoint overlap",
            RappError::NotInitialized => "library is not initialized",
            RappError::WorkBufferTooSmall => "work buffer smaller than worksize",
        }
    }
}

impl fmt::Display for RappError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

impl std::error::Error for RappError {}

/// Result alias used throughout the compute layer. Operations that
/// return a non-negative computed result (such as a population count)
/// use `Result<i64, RappError>` instead; this alias covers the common
/// `()`-on-success case.
pub type RappResult<T = ()> = Result<T, RappError>;
