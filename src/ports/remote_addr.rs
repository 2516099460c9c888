// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote address lookup trait definition.
//!
//! Log lines carry the network address of the client that triggered them. Where
//! that address comes from depends on the host application, so the logger asks
//! a `RemoteAddress` implementation instead of reading it itself.

/// A trait for resolving the address of the current remote caller.
///
/// Implementations return `None` when no request is being handled; the logger
/// then writes a blank address column.
///
/// # Examples
///
/// ```rust
/// use sitekit::ports::RemoteAddress;
///
/// struct Loopback;
///
/// impl RemoteAddress for Loopback {
///     fn remote_addr(&self) -> Option<String> {
///         Some("127.0.0.1".to_string())
///     }
/// }
///
/// assert_eq!(Loopback.remote_addr().as_deref(), Some("127.0.0.1"));
/// ```
pub trait RemoteAddress: Send + Sync {
    /// Returns the caller's address, if one is known.
    fn remote_addr(&self) -> Option<String>;
}
