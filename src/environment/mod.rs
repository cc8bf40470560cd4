//! Host environment detection.
//!
//! Identifies the operating system before anything else runs, since every
//! later path assumption depends on it.

pub mod os;

pub use os::{OsIdentity, SystemProbe, SUPPORTED_DISTRIBUTIONS};
