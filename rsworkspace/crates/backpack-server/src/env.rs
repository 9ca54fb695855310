//! Environment variable access behind a trait so configuration can be
//! tested without touching the process environment.

use std::env;

pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}

/// Reads the process environment.
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

#[cfg(test)]
pub use in_memory::InMemoryEnv;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_env_reports_missing_vars() {
        assert!(matches!(
            SystemEnv.var("BACKPACK_SURELY_UNSET_VAR_7731"),
            Err(env::VarError::NotPresent)
        ));
    }

    #[test]
    fn in_memory_env_set_and_get() {
        let env = InMemoryEnv::new();
        env.set("BACKPACK_PORT", "9000");
        assert_eq!(env.var("BACKPACK_PORT").unwrap(), "9000");
        assert!(env.var("BACKPACK_CIPHER_KEY").is_err());
    }
}
