//! Loader for workspace configuration with YAML + environment overlays.
//!
//! The merged sources deserialize into [`scout_common::ScoutConfig`]. Every
//! field there carries a serde default, so an empty file (or no file at all)
//! still produces a working configuration; environment variables win over
//! file contents.
use config::{Config, ConfigError, Environment, File};
use scout_common::ScoutConfig;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) if s.contains('$') => *s = expand_env_string(std::mem::take(s)),
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Expand `${VAR}` placeholders, following values that themselves contain
/// placeholders. The depth cap keeps cyclic definitions from looping.
fn expand_env_string(mut cur: String) -> String {
    for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
        let expanded = match shellexpand::env(&cur) {
            Ok(cow) => cow.into_owned(),
            Err(_) => return cur,
        };
        if expanded == cur {
            break;
        }
        cur = expanded;
    }
    cur
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct ScoutConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for ScoutConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoutConfigLoader {
    /// Start with sensible defaults: `SCOUT__`-separated env overrides on top
    /// of whatever files are attached later.
    ///
    /// ```
    /// use scout_config::ScoutConfigLoader;
    ///
    /// let config = ScoutConfigLoader::new()
    ///     .with_yaml_str("headless: true")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert!(config.headless);
    /// assert_eq!(config.wait_timeout_secs, 10);
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("SCOUT").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that may be absent. Missing files are simply skipped, so
    /// deployments can rely purely on environment variables.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use scout_config::ScoutConfigLoader;
    ///
    /// let cfg = ScoutConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// webdriver_url: "http://localhost:4444"
    /// heading_tags: [h1, h2]
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.webdriver_url, "http://localhost:4444");
    /// assert_eq!(cfg.heading_tags, vec!["h1", "h2"]);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// The loader combines YAML snippets with `SCOUT_`-prefixed environment
    /// variables and expands `${VAR}` placeholders before materialising the
    /// typed struct.
    ///
    /// ```
    /// use scout_config::ScoutConfigLoader;
    ///
    /// unsafe { std::env::set_var("DEMO_PASSWORD", "injected-from-env"); }
    ///
    /// let config = ScoutConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// demo:
    ///   base_url: "https://the-internet.herokuapp.com"
    ///   username: "tomsmith"
    ///   password: "${DEMO_PASSWORD}"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.demo.password, "injected-from-env");
    ///
    /// unsafe { std::env::remove_var("DEMO_PASSWORD"); }
    /// ```
    pub fn load(self) -> Result<ScoutConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first so `${VAR}` expansion can walk
        // the whole tree before the typed deserialize.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: ScoutConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
