//! Error handling with call-stack frames, serializable stack traces, and
//! flattening multi-error collections.
//!
//! This crate augments `std::error::Error` chains with three capabilities:
//! capturing *where* an error happened (as [`Frame`]s that serialize to text
//! and JSON and parse back), coalescing *many* errors into one flattened
//! [`MultiError`], and joining errors across threads with the
//! [`sync`] task-group helpers.
//!
//! # Frames
//!
//! Wrap errors as they propagate; print the gathered locations when one
//! escapes:
//!
//! ```
//! use error_trail::{frames_from, new_error, wrap, ResultExt};
//!
//! fn fetch() -> Result<(), error_trail::FramedError> {
//!     Err(new_error("connection refused")).frame()
//! }
//!
//! let err = fetch().unwrap_err();
//! let err = wrap!(err, "loading profile");
//! assert_eq!(err.to_string(), "loading profile: connection refused");
//! assert_eq!(frames_from(&err).len(), 2);
//! ```
//!
//! Captured frames resolve their function/file/line lazily, on first
//! access, so annotating every error costs little when only the escaping
//! ones are printed. Synthetic frames ([`Frame::new`]) carry locations
//! parsed back from logs or received over a boundary; [`Frames::from_text`]
//! and [`Frames::from_json`] reverse the two serialized forms.
//!
//! # Multiple errors
//!
//! ```
//! use error_trail::{new_error, MultiError};
//!
//! let merr = MultiError::from_errors([
//!     new_error("err 1"),
//!     new_error("err 2"),
//! ]);
//! assert_eq!(merr.to_string(), "[err 1; err 2]");
//!
//! // Collections flatten instead of nesting:
//! let rewrapped = MultiError::from_errors([merr.error_or_nil().unwrap()]);
//! assert_eq!(rewrapped.len(), 2);
//! ```
//!
//! [`append`] and [`append_into`] cover the two-operand case (deferred
//! cleanup results); [`join`] coalesces a batch.
//!
//! # Display forms
//!
//! Every type here renders compactly with `{}` and verbosely with `{:#}`:
//! a verbose [`FramedError`] prints its message and the frames extracted
//! from its whole chain; a verbose [`MultiError`] indexes each component's
//! verbose rendering; a [`chain`] error prints a `CAUSED BY:` cascade.

pub mod frame;
pub mod macros;
pub mod multi;
pub mod prelude;
pub mod sync;
pub mod traits;
pub mod wrap;

pub use frame::{
    error_from_text, Frame, FrameDisplay, FrameFormat, FrameParseError, FrameParseErrorKind,
    Frames, FramesDisplay,
};
pub use multi::{
    append, append_into, errors_from, join, MultiError, APPEND_MISUSE_MESSAGE,
};
pub use traits::ResultExt;
pub use wrap::{
    causes, chain, find_cause, frames_from, has_cause, is_cause, mask, new_error, new_with_frame,
    new_with_frame_at, new_with_frames, new_with_stack_trace, opaque, with_frame, with_frame_at,
    with_frames, with_message, with_stack_trace, Causes, FramedError,
};

/// Boxed error trait object used for causes and multi-error components.
///
/// `Send + Sync` keeps errors portable across the [`sync`] helpers and any
/// other thread boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
