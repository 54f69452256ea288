// gradebook: terminal academic records manager

use std::io;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use gradebook::auth::{FixedCredentials, Role};
use gradebook::config::Config;
use gradebook::logging;
use gradebook::session::Session;
use gradebook::snapshot::{self, Detached, Persistence, SnapshotFile};
use gradebook::ui::App;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    config.validate()?;

    if let Err(e) = logging::init(&config.log_file, &config.log_level) {
        eprintln!(
            "Warning: logging disabled, cannot open '{}': {}",
            config.log_file.display(),
            e
        );
    }

    let persistence: Box<dyn Persistence> = if config.no_persist {
        Box::new(Detached)
    } else {
        Box::new(SnapshotFile::new(
            config.data_file.clone(),
            config.max_classes,
            config.max_students,
        ))
    };

    let store = snapshot::load_or_empty(persistence.as_ref(), config.max_classes, config.max_students);
    tracing::info!(
        data_file = %config.data_file.display(),
        classes = store.active_class_count(),
        students = store.active_student_count(),
        "gradebook starting"
    );

    // The login screen raises the role before anything can be changed
    let session = Session::new(store, Role::Student, persistence);
    let mut app = App::new(session, Box::new(FixedCredentials::builtin()));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    if let Err(e) = app.save() {
        eprintln!("Warning: failed to save '{}': {}", config.data_file.display(), e);
    }
    tracing::info!("gradebook stopped");

    Ok(())
}
