use birdwatch::{App, Config};
use color_eyre::eyre::WrapErr;
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyCode, KeyModifiers,
};
use directories::ProjectDirs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "birdwatch=info,birdwatch_classifier=info";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "birdwatch", "birdwatch")
}

fn get_config_path(dirs: Option<&ProjectDirs>) -> PathBuf {
    match dirs {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("config/default.toml"),
    }
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(dirs: Option<&ProjectDirs>) -> color_eyre::Result<PathBuf> {
    let log_dir = match dirs {
        Some(dirs) => dirs.data_local_dir().to_path_buf(),
        None => std::env::temp_dir(),
    };
    std::fs::create_dir_all(&log_dir)
        .wrap_err_with(|| format!("creating log directory {}", log_dir.display()))?;
    let log_path = log_dir.join("birdwatch.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .wrap_err_with(|| format!("opening log file {}", log_path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(log_path)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let dirs = project_dirs();
    let log_path = init_logging(dirs.as_ref())?;

    let config_path = get_config_path(dirs.as_ref());
    let mut config = Config::load_or_default(&config_path);
    config.apply_env_overrides();
    tracing::info!(
        config = %config_path.display(),
        log = %log_path.display(),
        endpoint = %config.classifier.endpoint,
        "Starting birdwatch"
    );

    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();

    let mut app = App::new(config).wrap_err("invalid classifier endpoint")?;
    app.check_service();

    let mut terminal = ratatui::init();
    crossterm::execute!(io::stdout(), EnableMouseCapture, EnableBracketedPaste)?;

    let result = run(&mut terminal, &mut app);

    let _ = crossterm::execute!(io::stdout(), DisableBracketedPaste, DisableMouseCapture);
    ratatui::restore();

    result
}

fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> color_eyre::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;

            if let Event::Key(key) = &event {
                if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }
            }

            match app.handle_event(event) {
                Ok(true) => break,
                Ok(false) => {}
                Err(e) => app.show_error_notice(&e),
            }
        }

        app.process_async_events();
    }

    Ok(())
}
