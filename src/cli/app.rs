//! Hotkey listener app runner

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use crate::application::dispatcher::{ActivationDispatcher, ACTIVATION_QUEUE_CAPACITY};
use crate::application::ports::config::ConfigStore;
use crate::application::listener::ListenerController;
use crate::application::pipeline::TransformPipeline;
use crate::infrastructure::{
    create_provider, ArboardClipboard, EnigoInjector, NotifyRustObserver, ObserverSet,
    RdevKeySource, TerminalObserver, XdgConfigStore,
};

use super::args::RunOptions;
use super::config_cmd::build_registry;
use super::pid_file::{PidFile, PidFileError};
use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit code for success
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for runtime errors
pub const EXIT_ERROR: u8 = 1;

/// Run the hotkey listener until a shutdown signal arrives
pub async fn run(options: RunOptions) -> ExitCode {
    let presenter = Presenter::new();

    // Single instance: a second global key hook would double activations
    let pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        match e {
            PidFileError::AlreadyRunning(pid) => {
                presenter.error(&format!("Another instance is already running (PID: {})", pid));
            }
            _ => presenter.error(&e.to_string()),
        }
        return ExitCode::from(EXIT_ERROR);
    }

    // Load config and apply CLI overrides
    let store = XdgConfigStore::new();
    let mut config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e.to_string());
            let _ = pid_file.release();
            return ExitCode::from(EXIT_ERROR);
        }
    };
    if let Some(provider) = options.provider {
        config.provider = Some(provider);
    }
    if options.notify {
        config.notify = Some(true);
    }

    // Seed the registry through the duplicate-checked register path
    let registry = Arc::new(build_registry(&config, &presenter));
    if registry.is_empty() {
        presenter.error("No hotkeys configured. Run 'clipforge config init' to create the starter table.");
        let _ = pid_file.release();
        return ExitCode::from(EXIT_ERROR);
    }

    // Build the transform provider
    let (provider, provider_kind) = match create_provider(&config) {
        Ok(built) => built,
        Err(e) => {
            presenter.error(&e.to_string());
            let _ = pid_file.release();
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Observers: terminal always, desktop notifications opt-in
    let mut observers = ObserverSet::new();
    observers.push(Box::new(TerminalObserver::with_registry(Arc::clone(
        &registry,
    ))));
    if config.notify_or_default() {
        observers.push(Box::new(NotifyRustObserver::new()));
    }
    let observer = Arc::new(observers);

    // Pipeline and dispatcher
    let pipeline = Arc::new(TransformPipeline::new(
        ArboardClipboard::new(),
        EnigoInjector::new(),
        provider,
        Arc::clone(&observer),
    ));
    let dispatcher = ActivationDispatcher::new(Arc::clone(&pipeline), Arc::clone(&observer));

    let (activation_tx, activation_rx) = mpsc::channel(ACTIVATION_QUEUE_CAPACITY);
    let (dispatcher_shutdown_tx, dispatcher_shutdown_rx) = watch::channel(false);
    let dispatcher_task = tokio::spawn(async move {
        dispatcher.run(activation_rx, dispatcher_shutdown_rx).await;
    });

    // Listener over the OS key hook
    let mut controller = ListenerController::new(
        RdevKeySource::new(),
        Arc::clone(&registry),
        activation_tx,
        Arc::clone(&observer),
    );
    if controller.start().await.is_err() {
        // The observer already carries the HotkeysDisabled condition
        let _ = pid_file.release();
        return ExitCode::from(EXIT_ERROR);
    }

    let mut signals = match ShutdownSignal::new() {
        Ok(signals) => signals,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            controller.stop().await;
            let _ = pid_file.release();
            return ExitCode::from(EXIT_ERROR);
        }
    };

    presenter.info(&format!(
        "{} hotkeys active, transforming via {}",
        registry.len(),
        provider_kind
    ));
    presenter.info("Press Ctrl+C to exit");

    signals.recv().await;

    // Clean shutdown: stop the listener, drain the dispatcher; in-flight
    // pipelines run to their own completion
    presenter.info("Shutting down...");
    controller.stop().await;
    let _ = dispatcher_shutdown_tx.send(true);
    let _ = tokio::time::timeout(Duration::from_secs(2), dispatcher_task).await;
    let _ = pid_file.release();

    ExitCode::from(EXIT_SUCCESS)
}
