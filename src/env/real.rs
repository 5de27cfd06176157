//! Process environment implementation

use super::traits::VarEnv;

/// Delegates to `std::env::var`.
#[derive(Debug, Clone, Default)]
pub struct RealVarEnv;

impl RealVarEnv {
    pub fn new() -> Self {
        Self
    }
}

impl VarEnv for RealVarEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}
