//! Shorthand macros for building framed errors from format strings.
//!
//! - [`wrap!`](crate::wrap!) — wrap a cause with a call-site frame,
//!   optionally prefixing a formatted message.
//! - [`new_err!`](crate::new_err!) — build a new framed error from a format
//!   string.
//!
//! Both are glue over the constructors in [`wrap`](crate::wrap); prefer the
//! full syntax when the extra clarity matters.

/// Wraps an error with a call-site frame, optionally prefixing a formatted
/// message.
///
/// `wrap!(err)` attaches a single frame and passes the message through.
/// `wrap!(err, "fmt", args…)` additionally overrides the displayed message
/// with `"<formatted>: <cause message>"`; the cause stays reachable through
/// `source` and the matching helpers.
///
/// # Examples
///
/// ```
/// use error_trail::{frames_from, new_error, wrap};
///
/// let err = wrap!(new_error("root"), "context");
/// assert_eq!(err.to_string(), "context: root");
/// assert_eq!(frames_from(&err).len(), 1);
/// ```
#[macro_export]
macro_rules! wrap {
    ($err:expr $(,)?) => {
        $crate::with_frame_at($err, 0)
    };
    ($err:expr, $($arg:tt)*) => {{
        let cause = $crate::BoxError::from($err);
        let message = ::std::format!("{}: {}", ::std::format_args!($($arg)*), cause);
        $crate::with_message($crate::with_frame_at(cause, 0), message)
    }};
}

/// Builds a new error from a format string, annotated with the call-site
/// frame.
///
/// # Examples
///
/// ```
/// use error_trail::{frames_from, new_err};
///
/// let err = new_err!("invalid record {}", 7);
/// assert_eq!(err.to_string(), "invalid record 7");
/// assert_eq!(frames_from(&err).len(), 1);
/// ```
#[macro_export]
macro_rules! new_err {
    ($($arg:tt)*) => {
        $crate::new_with_frame_at(::std::format!($($arg)*), 0)
    };
}
