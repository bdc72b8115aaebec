//! Config subcommand handlers
//!
//! Hotkey edits go through a registry built from the stored table, so
//! the CLI enforces the same duplicate-combination rules as the live
//! listener, then persists the registry's view back to the store.

use thiserror::Error;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::{
    CombinationParseError, ConfigError, InvalidOutputKindError, RegistryError,
};
use crate::domain::hotkey::{HotkeyEntry, HotkeyRegistry};
use crate::domain::transform::OutputKind;

use super::args::ConfigAction;
use super::presenter::Presenter;

/// Errors from config subcommands
#[derive(Debug, Error)]
pub enum ConfigCmdError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Combination(#[from] CombinationParseError),

    #[error(transparent)]
    OutputKind(#[from] InvalidOutputKindError),
}

/// Handle a config subcommand
pub async fn handle_config_command(
    action: ConfigAction,
    store: &impl ConfigStore,
    presenter: &Presenter,
) -> Result<(), ConfigCmdError> {
    match action {
        ConfigAction::Init => {
            store.init().await?;
            presenter.success(&format!("Created {}", store.path().display()));
            presenter.info("Set your API key under [providers.gemini] or GEMINI_API_KEY");
        }
        ConfigAction::Show => {
            let config = store.load().await?;
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
            presenter.output(&rendered);
        }
        ConfigAction::Path => {
            presenter.output(&store.path().display().to_string());
        }
        ConfigAction::Add {
            combo,
            name,
            prompt,
            output,
            color,
        } => {
            let mut config = store.load().await?;
            let registry = build_registry(&config, presenter);

            let mut entry = HotkeyEntry::new(combo.parse()?, name.clone(), prompt)
                .with_output(output.parse::<OutputKind>()?);
            if let Some(color) = color {
                entry = entry.with_color(color);
            }
            let _ = registry.register(entry)?;

            persist(&registry, &mut config, store).await?;
            presenter.success(&format!("Added \"{name}\""));
        }
        ConfigAction::Remove { name } => {
            let mut config = store.load().await?;
            let registry = build_registry(&config, presenter);

            if registry.find(&name).is_none() {
                presenter.warn(&format!("No action named \"{name}\"; nothing removed"));
                return Ok(());
            }
            let _ = registry.unregister(&name);

            persist(&registry, &mut config, store).await?;
            presenter.success(&format!("Removed \"{name}\""));
        }
        ConfigAction::Rebind { name, combo } => {
            let mut config = store.load().await?;
            let registry = build_registry(&config, presenter);

            let combination = combo.parse()?;
            let _ = registry.rebind(&name, combination)?;

            persist(&registry, &mut config, store).await?;
            presenter.success(&format!("Rebound \"{name}\" to {combo}"));
        }
    }

    Ok(())
}

/// Seed a registry from the stored hotkey table, skipping entries that
/// collide rather than refusing to operate on the rest.
pub fn build_registry(config: &AppConfig, presenter: &Presenter) -> HotkeyRegistry {
    let registry = HotkeyRegistry::new();
    for entry in config.hotkeys_or_default() {
        let name = entry.name.clone();
        if let Err(e) = registry.register(entry) {
            presenter.warn(&format!("Skipping \"{name}\": {e}"));
        }
    }
    registry
}

async fn persist(
    registry: &HotkeyRegistry,
    config: &mut AppConfig,
    store: &impl ConfigStore,
) -> Result<(), ConfigError> {
    config.hotkeys = Some(registry.snapshot().as_ref().clone());
    store.save(config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::XdgConfigStore;

    fn store_in(dir: &tempfile::TempDir) -> XdgConfigStore {
        XdgConfigStore::with_path(dir.path().join("config.toml"))
    }

    #[tokio::test]
    async fn add_then_remove_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Add {
                combo: "ctrl+f5".to_string(),
                name: "Summarize".to_string(),
                prompt: "Summarize: ".to_string(),
                output: "text".to_string(),
                color: None,
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.hotkeys.as_ref().unwrap().len(), 1);

        handle_config_command(
            ConfigAction::Remove {
                name: "Summarize".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert!(config.hotkeys.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_duplicate_combination_fails_and_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let presenter = Presenter::new();

        let add = |combo: &str, name: &str| ConfigAction::Add {
            combo: combo.to_string(),
            name: name.to_string(),
            prompt: "p: ".to_string(),
            output: "text".to_string(),
            color: None,
        };

        handle_config_command(add("ctrl+f5", "One"), &store, &presenter)
            .await
            .unwrap();
        let err = handle_config_command(add("Ctrl+F5", "Two"), &store, &presenter)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigCmdError::Registry(RegistryError::DuplicateCombination { .. })
        ));

        let config = store.load().await.unwrap();
        assert_eq!(config.hotkeys.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rebind_updates_stored_combination() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let presenter = Presenter::new();

        handle_config_command(
            ConfigAction::Add {
                combo: "ctrl+f5".to_string(),
                name: "Summarize".to_string(),
                prompt: "Summarize: ".to_string(),
                output: "text".to_string(),
                color: None,
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        handle_config_command(
            ConfigAction::Rebind {
                name: "Summarize".to_string(),
                combo: "alt+s".to_string(),
            },
            &store,
            &presenter,
        )
        .await
        .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(
            config.hotkeys.unwrap()[0].combination.canonical(),
            "alt+s"
        );
    }

    #[tokio::test]
    async fn invalid_output_kind_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let presenter = Presenter::new();

        let err = handle_config_command(
            ConfigAction::Add {
                combo: "ctrl+f5".to_string(),
                name: "Bad".to_string(),
                prompt: "p".to_string(),
                output: "audio".to_string(),
                color: None,
            },
            &store,
            &presenter,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ConfigCmdError::OutputKind(_)));
    }
}
