//! Environment configuration.

use std::env;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub strict_ids: bool,
    pub trace_dispatch: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            strict_ids: env_flag("PROBE_STRICT_IDS"),
            trace_dispatch: env_flag("PROBE_TRACE_DISPATCH"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}
