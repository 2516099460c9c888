// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits are the seams between the library and the host application:
//! where a remote address comes from, who watches the config store, and how the
//! dependency container is filled.

pub mod observer;
pub mod populate;
pub mod remote_addr;

// Re-export commonly used types
pub use observer::ConfigObserver;
pub use populate::Populate;
pub use remote_addr::RemoteAddress;
