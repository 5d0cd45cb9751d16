//! Mutable shell session context.
//!
//! The active config key, project, and environment live here instead of
//! in process globals. The session doubles as the [`DefaultPathSource`]
//! used to resolve `...` placeholders: a config key selects that config's
//! stored defaults, otherwise the session's own current values apply.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::info;

use crate::completer::DefaultPathSource;
use crate::error::{FlagpathError, Result};
use crate::path::ResourcePath;

/// Default project and environment stored for a named config.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigDefaults {
    pub project: String,
    pub environment: String,
}

/// Shared session state, cheap to clone.
#[derive(Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<State>>,
}

#[derive(Default)]
struct State {
    config: Option<String>,
    project: String,
    environment: String,
    configs: HashMap<String, ConfigDefaults>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session seeded with a table of named configs.
    ///
    /// The table comes from whatever configuration layer the consuming
    /// shell uses; the session itself never touches disk.
    pub fn with_configs(configs: HashMap<String, ConfigDefaults>) -> Self {
        let session = Self::new();
        session.inner.write().unwrap().configs = configs;
        session
    }

    pub fn current_config(&self) -> Option<String> {
        self.inner.read().unwrap().config.clone()
    }

    pub fn set_current_config(&self, config: Option<String>) {
        info!(?config, "switching config");
        self.inner.write().unwrap().config = config;
    }

    pub fn current_project(&self) -> String {
        self.inner.read().unwrap().project.clone()
    }

    pub fn set_current_project(&self, project: String) {
        info!(%project, "switching project");
        self.inner.write().unwrap().project = project;
    }

    pub fn current_environment(&self) -> String {
        self.inner.read().unwrap().environment.clone()
    }

    pub fn set_current_environment(&self, environment: String) {
        info!(%environment, "switching environment");
        self.inner.write().unwrap().environment = environment;
    }

    /// Known config keys, sorted.
    pub fn config_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .inner
            .read()
            .unwrap()
            .configs
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Stored defaults for a named config.
    pub fn config_defaults(&self, key: &str) -> Option<ConfigDefaults> {
        self.inner.read().unwrap().configs.get(key).cloned()
    }
}

impl DefaultPathSource for Session {
    /// An explicit config key, or else the session's current one, selects
    /// a named config whose stored defaults are used; with no config key
    /// at all the session's current project and environment apply. The
    /// result carries the config prefix whenever a key was in play.
    fn default_path(&self, config: Option<&str>) -> Result<ResourcePath> {
        let state = self.inner.read().unwrap();
        let config = config
            .map(str::to_string)
            .or_else(|| state.config.clone());
        let (project, environment) = match &config {
            Some(key) => {
                let defaults = state
                    .configs
                    .get(key)
                    .ok_or_else(|| FlagpathError::UnknownConfig(key.clone()))?;
                (defaults.project.clone(), defaults.environment.clone())
            }
            None => (state.project.clone(), state.environment.clone()),
        };
        Ok(ResourcePath::new_abs(
            config.as_deref(),
            &[&project, &environment],
        ))
    }
}
