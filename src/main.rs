// ============================================================================
// harvestdash - Dashboard de tax-loss harvesting
// ============================================================================
// Programme TUI : cartes de plus-values avant/après et tableau des holdings
// à sélectionner pour le harvesting.
//
// Architecture :
// 1. Thread UI : event loop (render -> input -> update)
// 2. Worker thread : charge les données (runtime tokio dédié)
// 3. Channels mpsc entre les deux, App partagée via Arc<Mutex<>>
// ============================================================================

use std::io;
use std::path::Path;
use std::sync::{mpsc, Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use harvestdash::api::{load_dashboard_data, DashboardData, DataSource};
use harvestdash::app::App;
use harvestdash::config::{Config, DEFAULT_LOG_FILTER};
use harvestdash::ui::{render, Action, EventHandler};

// ============================================================================
// Commandes et résultats du worker
// ============================================================================

/// Commandes envoyées au worker thread
#[derive(Debug, Clone)]
enum AppCommand {
    /// Charger (ou recharger) les données depuis la source
    Load { source: DataSource },
}

/// Résultats renvoyés par le worker thread
#[derive(Debug)]
enum AppResult {
    Loaded(DashboardData),
    LoadError(String),
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne sont pas visibles une fois le TUI lancé : on log vers un
// fichier avec rotation quotidienne.
//
//   tail -f ~/.local/share/harvestdash/logs/harvestdash.log.*
//   RUST_LOG=harvestdash=trace cargo run
// ============================================================================

fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "harvestdash.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber tracing")?;

    info!(log_dir = %log_dir.display(), "Logging initialised");
    Ok(())
}

// ============================================================================
// Point d'entrée
// ============================================================================

fn main() -> Result<()> {
    let config = Config::from_env();

    // Sans logs on continue quand même
    init_logging(&config.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(source = %config.source.label(), "harvestdash starting up");

    let mut app = App::new();
    app.source_label = config.source.label();
    let app = Arc::new(Mutex::new(app));

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    spawn_background_worker(command_rx, result_tx);

    // Premier chargement : loading est posé avant le premier draw, les cartes
    // et le tableau restent en placeholder jusqu'au résultat
    request_load(&mut *lock(&app)?, &config.source, &command_tx);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, app, &events, &config.source, command_tx, result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

/// Verrouille l'état partagé
///
/// Un mutex empoisonné signifie qu'un thread a paniqué en tenant le verrou :
/// on remonte une erreur plutôt que de paniquer à notre tour
fn lock(app: &Mutex<App>) -> Result<MutexGuard<'_, App>> {
    app.lock().map_err(|_| anyhow!("État de l'application empoisonné"))
}

// ============================================================================
// Background Worker Thread
// ============================================================================

fn spawn_background_worker(
    command_rx: mpsc::Receiver<AppCommand>,
    result_tx: mpsc::Sender<AppResult>,
) {
    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!(error = ?e, "Failed to create tokio runtime");
                let _ = result_tx.send(AppResult::LoadError(format!("Runtime tokio : {}", e)));
                return;
            }
        };

        // Se termine quand le channel de commandes est fermé
        while let Ok(command) = command_rx.recv() {
            info!(?command, "Worker received command");

            match command {
                AppCommand::Load { source } => {
                    let message = match runtime.block_on(load_dashboard_data(&source)) {
                        Ok(data) => AppResult::Loaded(data),
                        Err(e) => {
                            error!(source = %source.label(), error = ?e, "Failed to load dashboard data");
                            AppResult::LoadError(format!("{:#}", e))
                        }
                    };

                    if result_tx.send(message).is_err() {
                        break;
                    }
                }
            }
        }

        info!("Worker thread exiting (channel closed)");
    });
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   0. résultats du worker
//   1. render
//   2. input
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
    events: &EventHandler,
    source: &DataSource,
    command_tx: mpsc::Sender<AppCommand>,
    result_rx: mpsc::Receiver<AppResult>,
) -> Result<()> {
    loop {
        if !lock(&app)?.is_running() {
            break;
        }

        // 0. RÉSULTATS : non bloquant
        match result_rx.try_recv() {
            Ok(AppResult::Loaded(data)) => lock(&app)?.snapshots_loaded(data),
            Ok(AppResult::LoadError(error)) => lock(&app)?.load_failed(error),
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                warn!("Worker thread disconnected");
            }
        }

        // 1. RENDER
        {
            let app_lock = lock(&app)?;
            terminal.draw(|frame| render(frame, &app_lock))?;
        }

        // 2. INPUT
        let event = events.next()?;
        if let Some(action) = Action::from_event(&event) {
            let mut app_lock = lock(&app)?;
            handle_action(&mut app_lock, action, source, &command_tx);
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des actions
// ============================================================================

fn handle_action(app: &mut App, action: Action, source: &DataSource, command_tx: &mpsc::Sender<AppCommand>) {
    // Two-step quit : toute autre action annule la demande
    if action != Action::Quit {
        app.cancel_quit();
    }

    match action {
        Action::Quit => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }
        Action::Up => app.navigate_up(),
        Action::Down => app.navigate_down(),
        Action::ToggleRow if !app.loading => app.toggle_cursor_row(),
        Action::ToggleAll if !app.loading => app.toggle_all(),
        Action::ToggleShowAll if app.can_expand() => {
            app.toggle_show_all();
            debug!(show_all = app.show_all, "User toggled show all");
        }
        Action::Reload if !app.loading => {
            info!("User requested reload");
            request_load(app, source, command_tx);
        }
        _ => {}
    }
}

/// Passe en chargement puis envoie la commande au worker
///
/// loading est posé côté UI, sous le même verrou que l'action : une seconde
/// pression de 'r' voit déjà le flag et n'empile pas un second chargement
fn request_load(app: &mut App, source: &DataSource, command_tx: &mpsc::Sender<AppCommand>) {
    app.start_loading(Some(format!("Loading {}...", source.label())));

    if command_tx.send(AppCommand::Load { source: source.clone() }).is_err() {
        app.load_failed("Worker thread indisponible".to_string());
    }
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Échec de l'activation du raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Échec de la création du terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_load_sets_loading_before_worker() {
        let (command_tx, command_rx) = mpsc::channel();
        let mut app = App::new();

        request_load(&mut app, &DataSource::Bundled, &command_tx);

        assert!(app.loading);
        assert!(matches!(command_rx.try_recv(), Ok(AppCommand::Load { source: DataSource::Bundled })));
    }

    #[test]
    fn test_reload_twice_queues_one_load() {
        let (command_tx, command_rx) = mpsc::channel();
        let mut app = App::new();

        handle_action(&mut app, Action::Reload, &DataSource::Bundled, &command_tx);
        handle_action(&mut app, Action::Reload, &DataSource::Bundled, &command_tx);

        assert!(command_rx.try_recv().is_ok());
        assert!(command_rx.try_recv().is_err());
    }

    #[test]
    fn test_request_load_without_worker_fails_the_load() {
        let (command_tx, command_rx) = mpsc::channel();
        drop(command_rx);
        let mut app = App::new();

        request_load(&mut app, &DataSource::Bundled, &command_tx);

        assert!(!app.loading);
        assert!(app.load_error.is_some());
    }
}
