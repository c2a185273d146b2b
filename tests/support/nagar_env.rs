use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

use nagar::{app_dirs::CONFIG_HOME_ENV, config::ENDPOINT_ENV};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Holds the process environment for one test and restores it on drop.
pub struct NagarEnvGuard {
    previous_home: Option<String>,
    previous_endpoint: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl NagarEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous_home = std::env::var(CONFIG_HOME_ENV).ok();
        let previous_endpoint = std::env::var(ENDPOINT_ENV).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
            std::env::remove_var(ENDPOINT_ENV);
        }
        Self {
            previous_home,
            previous_endpoint,
            _lock: lock,
        }
    }

    pub fn set_endpoint(&self, endpoint: &str) {
        // SAFETY: the guard holds the global env lock.
        unsafe {
            std::env::set_var(ENDPOINT_ENV, endpoint);
        }
    }
}

fn restore(key: &str, value: Option<String>) {
    // SAFETY: tests run under a global lock to prevent concurrent env mutations.
    unsafe {
        match value {
            Some(value) => std::env::set_var(key, value),
            None => std::env::remove_var(key),
        }
    }
}

impl Drop for NagarEnvGuard {
    fn drop(&mut self) {
        restore(CONFIG_HOME_ENV, self.previous_home.take());
        restore(ENDPOINT_ENV, self.previous_endpoint.take());
    }
}
