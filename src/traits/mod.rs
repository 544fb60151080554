//! Extension traits for ergonomic error annotation.

pub mod result_ext;

pub use result_ext::ResultExt;
