//! Environment configuration.

use std::env;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub debug: bool,
    pub debug_log: Option<String>,
    pub monochrome: bool,
    pub no_mouse: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            debug: env_flag("SIPFLOW_TUI_DEBUG"),
            debug_log: env_string_opt("SIPFLOW_TUI_LOG"),
            monochrome: env_flag("SIPFLOW_MONO"),
            no_mouse: env_flag("SIPFLOW_NO_MOUSE"),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::EnvConfig;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults_are_off() {
        let _lock = env_lock();
        let _g1 = set_env_guard("SIPFLOW_TUI_DEBUG", None);
        let _g2 = set_env_guard("SIPFLOW_TUI_LOG", None);
        let _g3 = set_env_guard("SIPFLOW_MONO", None);
        let _g4 = set_env_guard("SIPFLOW_NO_MOUSE", None);

        let config = EnvConfig::from_env();
        assert!(!config.debug);
        assert!(config.debug_log.is_none());
        assert!(!config.monochrome);
        assert!(!config.no_mouse);
    }

    #[test]
    fn env_flags_set_to_one_enable() {
        let _lock = env_lock();
        let _g1 = set_env_guard("SIPFLOW_TUI_DEBUG", Some("1"));
        let _g2 = set_env_guard("SIPFLOW_TUI_LOG", Some("/tmp/sipflow_tui.log"));
        let _g3 = set_env_guard("SIPFLOW_MONO", Some("1"));
        let _g4 = set_env_guard("SIPFLOW_NO_MOUSE", Some("1"));

        let config = EnvConfig::from_env();
        assert!(config.debug);
        assert_eq!(config.debug_log.as_deref(), Some("/tmp/sipflow_tui.log"));
        assert!(config.monochrome);
        assert!(config.no_mouse);
    }

    #[test]
    fn empty_log_path_is_ignored() {
        let _lock = env_lock();
        let _g1 = set_env_guard("SIPFLOW_TUI_LOG", Some(""));
        let config = EnvConfig::from_env();
        assert!(config.debug_log.is_none());
    }
}
