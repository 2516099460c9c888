// SPDX-License-Identifier: MIT OR Apache-2.0

//! Remote address adapters.
//!
//! - [`NoRemoteAddress`] for code that never runs inside a request.
//! - [`FixedRemoteAddress`] for tests and batch jobs that log on behalf of a
//!   known host.
//! - [`RequestRemoteAddress`] for request handlers: the handler enters a
//!   request scope and every log line written on that thread until the scope
//!   ends carries the client's address.

use crate::ports::RemoteAddress;
use std::cell::RefCell;
use std::net::SocketAddr;

/// Header consulted before the peer address.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Resolves to no address.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRemoteAddress;

impl RemoteAddress for NoRemoteAddress {
    fn remote_addr(&self) -> Option<String> {
        None
    }
}

/// Resolves to the same address every time.
///
/// # Examples
///
/// ```rust
/// use sitekit::adapters::FixedRemoteAddress;
/// use sitekit::ports::RemoteAddress;
///
/// let addr = FixedRemoteAddress::new("10.0.0.7");
/// assert_eq!(addr.remote_addr().as_deref(), Some("10.0.0.7"));
/// ```
#[derive(Debug, Clone)]
pub struct FixedRemoteAddress(String);

impl FixedRemoteAddress {
    /// Creates an adapter that always reports `addr`.
    pub fn new(addr: impl Into<String>) -> Self {
        FixedRemoteAddress(addr.into())
    }
}

impl RemoteAddress for FixedRemoteAddress {
    fn remote_addr(&self) -> Option<String> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.clone())
        }
    }
}

thread_local! {
    static CURRENT_REQUEST: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Resolves to the address of the request being handled on this thread.
///
/// The address is taken from the first entry of the `X-Forwarded-For` header
/// when present, otherwise from the peer socket address. Outside a request
/// scope it resolves to nothing.
///
/// # Examples
///
/// ```rust
/// use sitekit::adapters::RequestRemoteAddress;
/// use sitekit::ports::RemoteAddress;
///
/// let adapter = RequestRemoteAddress;
/// assert!(adapter.remote_addr().is_none());
///
/// {
///     let headers = [("X-Forwarded-For", "203.0.113.9, 10.0.0.1")];
///     let _scope = RequestRemoteAddress::enter(headers, None);
///     assert_eq!(adapter.remote_addr().as_deref(), Some("203.0.113.9"));
/// }
///
/// assert!(adapter.remote_addr().is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestRemoteAddress;

impl RequestRemoteAddress {
    /// Starts a request scope on the current thread.
    ///
    /// The scope ends, and the address is forgotten, when the returned guard is
    /// dropped. Nested scopes restore the outer address on exit.
    pub fn enter<'a, I>(headers: I, peer: Option<SocketAddr>) -> RequestScope
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let addr = Self::resolve(headers, peer);
        let previous = CURRENT_REQUEST.with(|current| current.replace(addr));
        RequestScope { previous }
    }

    /// Picks the client address from request headers and the peer address.
    pub fn resolve<'a, I>(headers: I, peer: Option<SocketAddr>) -> Option<String>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let forwarded = headers
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(FORWARDED_FOR_HEADER))
            .and_then(|(_, value)| value.split(',').next())
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
            .map(str::to_string);

        forwarded.or_else(|| peer.map(|addr| addr.ip().to_string()))
    }
}

impl RemoteAddress for RequestRemoteAddress {
    fn remote_addr(&self) -> Option<String> {
        CURRENT_REQUEST.with(|current| current.borrow().clone())
    }
}

/// Guard returned by [`RequestRemoteAddress::enter`].
#[derive(Debug)]
#[must_use = "the request scope ends when the guard is dropped"]
pub struct RequestScope {
    previous: Option<String>,
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_REQUEST.with(|current| *current.borrow_mut() = previous);
    }
}
