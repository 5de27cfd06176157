//! Environment trait definitions

/// Read access to environment variables
///
/// # Examples
///
/// ```
/// use keyshuffle::env::VarEnv;
///
/// fn target<E: VarEnv>(env: &E) -> String {
///     env.var("interconn").unwrap_or_else(|| "default".to_string())
/// }
/// ```
pub trait VarEnv: Send + Sync {
    /// Value of `key`, or `None` when unset or not valid unicode
    fn var(&self, key: &str) -> Option<String>;
}
