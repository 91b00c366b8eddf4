mod app;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use webcamstreamer::config::{self, Settings};
use webcamstreamer::controller::Notification;
use webcamstreamer::docker::DockerCli;
use webcamstreamer::host::{LocalHost, stdio};
use webcamstreamer::logging::{self, LogTarget};
use webcamstreamer::plugin::{Command, Event, Host, Plugin, WebcamStreamer};

use app::{Action, App};

type Streamer = WebcamStreamer<DockerCli, LocalHost>;

const USAGE: &str = "usage: webcamstreamer [--stdio] [CONFIG_FILE]";

fn main() -> Result<()> {
    let mut use_stdio = false;
    let mut config_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--stdio" => use_stdio = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            other if other.starts_with('-') => anyhow::bail!("unknown option {other}\n{USAGE}"),
            other => config_path = Some(PathBuf::from(other)),
        }
    }

    let settings = load_settings(config_path.as_deref())?;
    if use_stdio {
        run_stdio(settings)
    } else {
        run_tui(settings)
    }
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => config::load_from(path),
        None => {
            let cwd = std::env::current_dir().context("cannot determine working directory")?;
            config::load(&cwd)
        }
    }
}

/// Serve a host process over stdin/stdout.
fn run_stdio(settings: Settings) -> Result<()> {
    logging::init(&settings.logging, LogTarget::Stderr)?;
    info!("serving plugin requests on stdio");

    let (tx, rx) = mpsc::channel();
    let plugin = WebcamStreamer::new(DockerCli::default(), LocalHost::new(settings, tx));

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    stdio::serve(&plugin, &rx, stdin.lock(), &mut stdout)
}

fn run_tui(settings: Settings) -> Result<()> {
    logging::init(&settings.logging, LogTarget::file_for(&settings.logging))?;

    // Ensure terminal is restored on panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, settings);
    restore_terminal()?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, settings: Settings) -> Result<()> {
    let (note_tx, note_rx) = mpsc::channel();
    let plugin = Arc::new(WebcamStreamer::new(
        DockerCli::default(),
        LocalHost::new(settings.clone(), note_tx),
    ));
    let actions = spawn_worker(Arc::clone(&plugin));

    let mut app = App::new(settings);
    dispatch(&mut app, &actions, Action::Startup);

    while app.running {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll faster while a command is in flight so the spinner moves.
        let poll_timeout = if app.processing {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(250)
        };
        if event::poll(poll_timeout)?
            && let TermEvent::Key(key) = event::read()?
        {
            handle_key(&mut app, key, &plugin, &actions);
        }

        drain_notifications(&mut app, &note_rx);
        app.tick = app.tick.wrapping_add(1);
    }

    Ok(())
}

/// Run plugin callbacks off the UI thread; engine calls block.
fn spawn_worker(plugin: Arc<Streamer>) -> Sender<Action> {
    let (tx, rx) = mpsc::channel::<Action>();
    std::thread::spawn(move || {
        for action in rx {
            match action {
                Action::Startup => plugin.on_startup(),
                // The local terminal user operates the printer.
                Action::Command(command) => {
                    plugin.on_command(command, true);
                }
                Action::Event(event) => plugin.on_event(&event),
            }
        }
    });
    tx
}

fn dispatch(app: &mut App, actions: &Sender<Action>, action: Action) {
    app.begin(&action);
    if actions.send(action).is_err() {
        app.processing = false;
        app.info("plugin worker stopped");
    }
}

fn handle_key(app: &mut App, key: KeyEvent, plugin: &Streamer, actions: &Sender<Action>) {
    if app.show_help {
        app.show_help = false;
        return;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), _) => {
            app.running = false;
        }
        (KeyCode::Char('?'), _) => app.show_help = true,
        (KeyCode::Char('t') | KeyCode::Enter | KeyCode::Char(' '), _) if !app.processing => {
            let command = app.toggle_command();
            dispatch(app, actions, Action::Command(command));
        }
        (KeyCode::Char('s'), _) => dispatch(app, actions, Action::Command(Command::StartStream)),
        (KeyCode::Char('x'), _) => dispatch(app, actions, Action::Command(Command::StopStream)),
        (KeyCode::Char('c'), _) => dispatch(app, actions, Action::Command(Command::CheckStream)),
        (KeyCode::Char('p'), _) => dispatch(app, actions, Action::Event(Event::PrintStarted)),
        (KeyCode::Char('d'), _) => dispatch(app, actions, Action::Event(Event::PrintDone)),
        (KeyCode::Char('n'), _) => dispatch(app, actions, Action::Event(Event::PrintCancelled)),
        (KeyCode::Char('a'), _) => {
            plugin
                .host()
                .update_settings(|s| s.auto_start = !s.auto_start);
            app.settings = plugin.host().settings();
            let state = if app.settings.auto_start { "on" } else { "off" };
            app.info(format!("auto-start {state}"));
        }
        _ => {}
    }
}

/// Drain pending notifications without blocking.
fn drain_notifications(app: &mut App, rx: &Receiver<Notification>) {
    while let Ok(note) = rx.try_recv() {
        app.apply(note);
    }
}
