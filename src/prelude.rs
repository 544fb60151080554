//! Convenience re-exports for common usage patterns.
//!
//! Import everything with:
//!
//! ```
//! use error_trail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`wrap!`](crate::wrap!), [`new_err!`](crate::new_err!)
//! - **Types**: [`Frame`], [`Frames`], [`FramedError`], [`MultiError`],
//!   [`BoxError`]
//! - **Constructors**: [`new_error`], [`with_frame`], [`with_stack_trace`],
//!   [`with_message`], [`chain`]
//! - **Helpers**: [`frames_from`], [`append`], [`append_into`], [`join`]
//! - **Traits**: [`ResultExt`]
//!
//! # Examples
//!
//! ```
//! use error_trail::prelude::*;
//!
//! fn parse_port(raw: &str) -> Result<u16, FramedError> {
//!     raw.parse::<u16>().wrap_err_with(|| format!("bad port {raw:?}"))
//! }
//!
//! let err = parse_port("http").unwrap_err();
//! assert_eq!(err.to_string(), "bad port \"http\"");
//! assert_eq!(frames_from(&err).len(), 1);
//! ```

// Macros
pub use crate::{new_err, wrap};

// Core types
pub use crate::frame::{Frame, FrameFormat, Frames};
pub use crate::multi::MultiError;
pub use crate::wrap::FramedError;

// Constructors and helpers
pub use crate::multi::{append, append_into, join};
pub use crate::wrap::{
    chain, frames_from, mask, new_error, opaque, with_frame, with_message, with_stack_trace,
};

// Traits
pub use crate::traits::ResultExt;

// Boxed error alias used across the crate surface
pub use crate::BoxError;
