//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    validate_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    validate_key(key)?;

    let config = store.load().await?;
    presenter.output(read_value(&config, key).as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(key, read_value(&config, key).as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn validate_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Validate and store a value under a known key
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: &str| ConfigError::ValidationError {
        key: key.to_string(),
        message: message.to_string(),
    };

    match key {
        "recordings_dir" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty"));
            }
            config.recordings_dir = Some(value.to_string());
        }
        "notify" => {
            config.notify =
                Some(parse_bool(value).map_err(|_| invalid("Value must be 'true' or 'false'"))?);
        }
        "share_command" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty"));
            }
            config.share_command = Some(value.trim().to_string());
        }
        _ => return Err(invalid("Unknown key")),
    }
    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "recordings_dir" => config.recordings_dir.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        "share_command" => config.share_command.clone(),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn apply_and_read_each_key() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "recordings_dir", "/srv/rec").unwrap();
        apply_value(&mut config, "notify", "no").unwrap();
        apply_value(&mut config, "share_command", " nautilus ").unwrap();

        assert_eq!(read_value(&config, "recordings_dir").as_deref(), Some("/srv/rec"));
        assert_eq!(read_value(&config, "notify").as_deref(), Some("false"));
        assert_eq!(read_value(&config, "share_command").as_deref(), Some("nautilus"));
    }

    #[test]
    fn invalid_bool_is_rejected() {
        let mut config = AppConfig::empty();
        let err = apply_value(&mut config, "notify", "loud").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref key, .. } if key == "notify"));
    }

    #[test]
    fn empty_paths_are_rejected() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "recordings_dir", "  ").is_err());
        assert!(apply_value(&mut config, "share_command", "").is_err());
    }

    #[test]
    fn unknown_key_lists_valid_keys() {
        let err = validate_key("api_key").unwrap_err();
        assert!(err.to_string().contains("recordings_dir, notify, share_command"));
    }

    #[tokio::test]
    async fn set_then_get_through_store() {
        let tmp = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(tmp.path().join("config.toml"));
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Set {
                key: "notify".into(),
                value: "false".into(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.notify, Some(false));
        assert!(config.recordings_dir.is_none());
    }
}
