use std::path::Path;

use anyhow::Context;
use yaniv::GameConfig;

/// Reads a [`GameConfig`] from a JSON file. Missing fields take their defaults.
pub fn load_game_config(path: &Path) -> anyhow::Result<GameConfig> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read config file '{}'", path.display()))?;
    serde_json::from_str(&body)
        .with_context(|| format!("Invalid config file '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{ "rounds": 5 }"#).unwrap();
        assert_eq!(config.rounds, 5);
        assert_eq!(config.player_names, GameConfig::default().player_names);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_game_config(Path::new("/nonexistent/yaniv.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/yaniv.json"));
    }
}
