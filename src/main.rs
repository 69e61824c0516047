use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use parley::adapters::{FileEndpointStore, TungsteniteConnector};
use parley::app::App;
use parley::cli::{parse_args, run_cli_command, CliCommand, VERSION};
use parley::config::Config;
use parley::logging::init_logging;
use parley::session::ChatSession;
use parley::terminal::{setup_panic_hook, TerminalManager};
use parley::traits::SessionSignal;
use parley::ui;
use parley::websocket::WsClientConfig;

/// Animation tick for the status pulse
const TICK_RATE: Duration = Duration::from_millis(100);

/// How long quitting waits for the server to acknowledge the close
const CLOSE_GRACE: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    let command = parse_args(std::env::args());
    if let Some(result) = run_cli_command(&command) {
        if result.is_err() {
            std::process::exit(2);
        }
        return Ok(());
    }
    let CliCommand::Run(options) = command else {
        return Ok(());
    };

    color_eyre::install()?;

    let config = Config::from_options(&options)?;
    let _log_guard = init_logging(&config.logs_dir(), config.log_level.as_deref());
    info!("parley {} starting, data dir {:?}", VERSION, config.data_dir);

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run(config));
    info!("parley exiting");
    result
}

async fn run(config: Config) -> Result<()> {
    let connector = Arc::new(TungsteniteConnector::new(
        WsClientConfig::default().with_connect_timeout(config.connect_timeout),
    ));
    let store = Arc::new(FileEndpointStore::new(&config.data_dir));
    let (session, mut signal_rx) = ChatSession::new(connector, store, config.heartbeat_period);
    let mut app = App::new(session, config.initial_url.clone());

    let mut terminal_manager = TerminalManager::new()?;
    let result = run_app(terminal_manager.terminal(), &mut app, &mut signal_rx).await;
    terminal_manager.restore()?;

    if !app.should_quit {
        app.quit();
    }
    finish_close(&mut app, &mut signal_rx).await;
    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    signal_rx: &mut mpsc::UnboundedReceiver<SessionSignal>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut tick = tokio::time::interval(TICK_RATE);

    while !app.should_quit {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = tick.tick() => app.tick(),

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) => app.handle_key(key),
                    Some(Ok(Event::Paste(text))) => app.handle_paste(text),
                    Some(Ok(Event::Mouse(mouse))) => app.handle_mouse(mouse),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }

            Some(signal) = signal_rx.recv() => app.handle_signal(signal),
        }
    }

    Ok(())
}

/// Keep dispatching until the connection reports closed, up to [`CLOSE_GRACE`].
async fn finish_close(app: &mut App, signal_rx: &mut mpsc::UnboundedReceiver<SessionSignal>) {
    let deadline = tokio::time::sleep(CLOSE_GRACE);
    tokio::pin!(deadline);

    while app.session.lifecycle().is_active() {
        tokio::select! {
            _ = &mut deadline => {
                warn!("Connection did not close within {:?}", CLOSE_GRACE);
                break;
            }
            signal = signal_rx.recv() => match signal {
                Some(signal) => app.handle_signal(signal),
                None => break,
            },
        }
    }
}
