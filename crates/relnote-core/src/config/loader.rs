//! Configuration loading
//!
//! The effective configuration is built in layers: built-in defaults, then the
//! user file, then the repository file. Layers are merged as documents, so a
//! later file only needs the keys it changes.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::error::ConfigError;

use super::defaults::{config_file_names, root_config_file_names, CONFIG_DIR, HOME_ENV};
use super::types::Config;
use super::validation::validate_config;

type Result<T> = std::result::Result<T, ConfigError>;

/// Read a configuration file into a generic document
fn read_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;

    let document = if path.extension().is_some_and(|e| e == "toml") {
        let value: toml::Value = toml::from_str(&content)?;
        serde_json::to_value(value)?
    } else {
        serde_yaml::from_str::<Option<Value>>(&content)?.unwrap_or(Value::Null)
    };

    match document {
        Value::Object(_) | Value::Null => Ok(document),
        _ => Err(ConfigError::ParseError {
            path: path.to_path_buf(),
            message: "top level must be a mapping".to_string(),
        }),
    }
}

/// Merge `overlay` into `base`: mappings merge per key, other values replace.
/// Null values in the overlay leave the base untouched.
pub fn merge_documents(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_documents(existing, value),
                    None => {
                        if !value.is_null() {
                            base.insert(key, value);
                        }
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Build a configuration from defaults and the given files, in order
pub fn load_layers(paths: &[PathBuf]) -> Result<Config> {
    let mut document = serde_json::to_value(Config::default())?;

    for path in paths {
        info!(path = %path.display(), "loading config layer");
        merge_documents(&mut document, read_document(path)?);
    }

    let config: Config = serde_json::from_value(document)?;
    validate_config(&config)?;
    debug!(layers = paths.len(), "config loaded and validated");
    Ok(config)
}

/// Load configuration from a single file over the defaults
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    load_layers(&[path.to_path_buf()])
}

fn first_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|name| dir.join(name)).find(|p| p.is_file())
}

/// Find the repository configuration in `start_dir` or its parents.
///
/// At each directory level the search checks:
///   1. `<dir>/.relnote/config.{yml,yaml,toml}`
///   2. `<dir>/relnote.{yml,yaml,toml}`
///
/// The first match wins.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        let found = first_existing(&current.join(CONFIG_DIR), &config_file_names())
            .or_else(|| first_existing(&current, &root_config_file_names()));
        if let Some(path) = found {
            info!(path = %path.display(), "found config file");
            return Some(path);
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no repository config file found");
    None
}

/// User configuration file, from `$RELNOTE_HOME` or the platform config directory
pub fn user_config_path() -> Option<PathBuf> {
    let dir = match std::env::var_os(HOME_ENV) {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => dirs::config_dir()?.join("relnote"),
    };
    first_existing(&dir, &config_file_names())
}

/// Load the effective configuration for a working directory.
///
/// Returns the configuration and the files that contributed to it.
pub fn load_effective_config(dir: &Path) -> Result<(Config, Vec<PathBuf>)> {
    let layers: Vec<PathBuf> = user_config_path()
        .into_iter()
        .chain(find_config(dir))
        .collect();

    if layers.is_empty() {
        debug!(dir = %dir.display(), "no config found, using defaults");
    }

    let config = load_layers(&layers)?;
    Ok((config, layers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SectionType;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_merge_documents() {
        let mut base = json!({"a": {"b": 1, "c": [1, 2]}, "d": "x"});
        merge_documents(&mut base, json!({"a": {"c": [3]}, "d": null, "e": true}));
        assert_eq!(base, json!({"a": {"b": 1, "c": [3]}, "d": "x", "e": true}));
    }

    #[test]
    fn test_find_config_in_dot_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        let config_path = dir.join("config.yml");
        std::fs::write(&config_path, "version: \"1.1\"\n").unwrap();

        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config(&nested), Some(config_path));
    }

    #[test]
    fn test_dot_dir_preferred_over_root_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        let dot_path = dir.join("config.toml");
        std::fs::write(&dot_path, "version = \"1.1\"\n").unwrap();
        std::fs::write(temp.path().join("relnote.yml"), "version: \"1.1\"\n").unwrap();

        assert_eq!(find_config(temp.path()), Some(dot_path));
    }

    #[test]
    fn test_load_yaml_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("relnote.yml");
        std::fs::write(
            &path,
            "versioning:\n  update-major: [feat]\n  update-minor: []\ncommit-message:\n  scope:\n    values: [api, cli]\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.versioning.update_major, vec!["feat"]);
        assert!(config.versioning.update_minor.is_empty());
        // untouched keys keep their defaults
        assert_eq!(config.versioning.update_patch.len(), 9);
        assert_eq!(config.commit_message.scope.values, vec!["api", "cli"]);
        assert_eq!(config.commit_message.issue.regex, "[A-Z]+-[0-9]+");
    }

    #[test]
    fn test_load_toml_sections_replace_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("relnote.toml");
        std::fs::write(
            &path,
            "[[release-notes.sections]]\nname = \"Changes\"\nsection-type = \"commits\"\ncommit-types = [\"feat\", \"fix\"]\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.release_notes.sections.len(), 1);
        assert_eq!(
            config.release_notes.sections[0].section_type,
            SectionType::Commits
        );
    }

    #[test]
    fn test_later_layer_wins() {
        let temp = TempDir::new().unwrap();
        let user = temp.path().join("user.yml");
        let repo = temp.path().join("repo.yml");
        std::fs::write(&user, "tag:\n  pattern: \"v{version}\"\n  filter: \"v*\"\n").unwrap();
        std::fs::write(&repo, "tag:\n  pattern: \"release-{version}\"\n").unwrap();

        let config = load_layers(&[user, repo]).unwrap();
        assert_eq!(config.tag.pattern, "release-{version}");
        assert_eq!(config.tag.filter, "v*");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("relnote.yml");
        std::fs::write(&path, "").unwrap();

        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("relnote.yml");
        std::fs::write(&path, "commit-message:\n  header-selector: \"(\"\n").unwrap();

        assert!(matches!(
            load_config(&path),
            Err(ConfigError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yml");
        assert!(matches!(load_config(&path), Err(ConfigError::NotFound(_))));
    }
}
