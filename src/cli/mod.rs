//! CLI handling
//!
//! - Argument parsing structures
//! - Routing a parsed command to its stage

pub mod args;
pub mod router;

pub use args::{Cli, Commands};
pub use router::{build_stage, execute_command};
