//! Extension trait for annotating the error side of a `Result`.
//!
//! [`ResultExt`] replaces the `map_err(|e| with_frame(e))` boilerplate with
//! postfix methods, so propagation sites stay one line:
//!
//! ```
//! use error_trail::{FramedError, ResultExt};
//!
//! fn load_config() -> Result<String, FramedError> {
//!     std::fs::read_to_string("config.toml")
//!         .wrap_err("loading configuration file")
//! }
//!
//! assert!(load_config().is_err());
//! ```

use crate::wrap::{with_frame_at, with_message, with_stack_trace, FramedError};
use crate::BoxError;

/// Adds frame and message annotation methods to `Result`.
///
/// Every method is a no-op on `Ok`. The `_with` form defers building the
/// message until an error actually occurs, so the success path pays
/// nothing for an expensive format.
pub trait ResultExt<T> {
    /// Annotates the error with the caller's frame.
    fn frame(self) -> Result<T, FramedError>;

    /// Annotates the error with the entire call stack.
    fn stack_trace(self) -> Result<T, FramedError>;

    /// Annotates the error with the caller's frame and overrides its
    /// displayed message. The original error stays reachable through
    /// `source`.
    fn wrap_err(self, message: impl Into<String>) -> Result<T, FramedError>;

    /// Like [`wrap_err`](ResultExt::wrap_err), but builds the message
    /// lazily.
    ///
    /// ```
    /// use error_trail::ResultExt;
    ///
    /// fn process(user_id: u64) -> Result<(), error_trail::FramedError> {
    ///     let result: Result<(), &str> = Err("not found");
    ///     result.wrap_err_with(|| format!("processing user {user_id}"))
    /// }
    ///
    /// assert_eq!(process(42).unwrap_err().to_string(), "processing user 42");
    /// ```
    fn wrap_err_with<F, S>(self, message: F) -> Result<T, FramedError>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn frame(self) -> Result<T, FramedError> {
        self.map_err(|err| with_frame_at(err, 1))
    }

    fn stack_trace(self) -> Result<T, FramedError> {
        self.map_err(|err| with_stack_trace(err))
    }

    fn wrap_err(self, message: impl Into<String>) -> Result<T, FramedError> {
        self.map_err(|err| with_message(with_frame_at(err, 1), message))
    }

    fn wrap_err_with<F, S>(self, message: F) -> Result<T, FramedError>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|err| with_message(with_frame_at(err, 1), message()))
    }
}
