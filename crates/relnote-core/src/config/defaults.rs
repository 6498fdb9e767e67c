//! Default configuration values

use super::types::Config;

/// Directory holding the repository configuration
pub const CONFIG_DIR: &str = ".relnote";

/// Environment variable overriding the user configuration directory
pub const HOME_ENV: &str = "RELNOTE_HOME";

/// Configuration file names searched in the user directory and in `.relnote/`
pub fn config_file_names() -> Vec<&'static str> {
    vec!["config.yml", "config.yaml", "config.toml"]
}

/// Configuration file names searched at a directory root
pub fn root_config_file_names() -> Vec<&'static str> {
    vec!["relnote.yml", "relnote.yaml", "relnote.toml"]
}

/// Generate default configuration YAML
pub fn default_config_yaml() -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_yaml_roundtrips() {
        let yaml = default_config_yaml().unwrap();
        assert!(yaml.contains("update-minor"));
        assert!(yaml.contains("breaking-changes"));

        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
