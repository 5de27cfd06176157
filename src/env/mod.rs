//! Environment abstraction for stage configuration
//!
//! Stages are configured from the ambient process environment. Reading it
//! through a trait keeps configuration resolution testable:
//! - **Traits**: `VarEnv` names the single capability a stage needs
//! - **Real Implementation**: reads `std::env`
//! - **Mock Implementation**: in-memory variables for tests
//!
//! # Usage
//!
//! ```
//! use keyshuffle::env::{MockVarEnv, VarEnv};
//!
//! let env = MockVarEnv::new();
//! env.set("interconn", "ATT");
//!
//! assert_eq!(env.var("interconn").as_deref(), Some("ATT"));
//! assert_eq!(env.var("d2_col"), None);
//! ```

mod mock;
mod real;
mod traits;

pub use mock::MockVarEnv;
pub use real::RealVarEnv;
pub use traits::VarEnv;
