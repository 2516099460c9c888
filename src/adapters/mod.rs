// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing the filesystem and environment implementations.
//!
//! Each adapter here touches something outside the process: the JSON codec and
//! the file logger work on disk, the remote address adapters read the request
//! the host application is serving.

pub mod file_logger;
pub mod json_file;
pub mod remote_addr;

pub use file_logger::{FileLogger, LoggerSettings, LoggerState};
pub use json_file::JsonFile;
pub use remote_addr::{FixedRemoteAddress, NoRemoteAddress, RequestRemoteAddress, RequestScope};
