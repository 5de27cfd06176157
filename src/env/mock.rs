//! In-memory environment for testing

use super::traits::VarEnv;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock environment backed by a shared map
#[derive(Debug, Clone, Default)]
pub struct MockVarEnv {
    vars: Arc<Mutex<HashMap<String, String>>>,
}

impl MockVarEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.vars
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.into(), value.into());
    }

    /// Builder-style variant of [`MockVarEnv::set`]
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }
}

impl VarEnv for MockVarEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}
