use std::{
    path::Path,
    sync::{Mutex, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_HOME: &str = "KITSHELF_CONFIG_HOME";
const SYSTEM_KITS: &str = "KITSHELF_SYSTEM_KITS";

/// Points the app root and the system kit root into a test directory.
pub struct KitshelfEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl KitshelfEnvGuard {
    pub fn set(config_home: &Path, system_kits: &Path) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let mut previous = Vec::new();
        for (key, value) in [(CONFIG_HOME, config_home), (SYSTEM_KITS, system_kits)] {
            previous.push((key, std::env::var(key).ok()));
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                std::env::set_var(key, value);
            }
        }
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for KitshelfEnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            match value {
                // SAFETY: tests run under a global lock to prevent concurrent env mutations.
                Some(value) => unsafe {
                    std::env::set_var(key, value);
                },
                // SAFETY: tests run under a global lock to prevent concurrent env mutations.
                None => unsafe {
                    std::env::remove_var(key);
                },
            }
        }
    }
}
