//! Setup pipeline orchestration.
//!
//! Stages run once, in order:
//!
//! 1. system probe
//! 2. dependency resolution
//! 3. 1-Wire interface
//! 4. sensor detection
//! 5. configuration
//! 6. skill install, smoke tests and enable
//!
//! A [`SetupContext`] carries results from one stage to the next.

pub mod context;
pub mod pipeline;
pub mod summary;

pub use context::{SetupContext, SetupOptions, SetupOutcome};
pub use pipeline::SetupPipeline;
pub use summary::print_summary;
