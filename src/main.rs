use std::fs::File;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{error, info};

use oidash::catalog::SymbolCatalog;
use oidash::config::{AppConfig, LoggingConfig, fetch_config};
use oidash::handlers::ChartHandlers;
use oidash::market_data::MarketDataClient;
use oidash::tui::app::Tab;
use oidash::tui::event::{spawn_event_reader, spawn_tick_timer, update};
use oidash::tui::{Action, App, Message, Tui, render, restore_terminal, setup_terminal};
use oidash::{OidashError, Result};

const TICK_INTERVAL_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<()> {
    let config = fetch_config()?;
    init_tracing(&config.logging)?;

    let client = MarketDataClient::new(&config.binance)?;
    let catalog = SymbolCatalog::load(&client).await?;
    info!(symbols = catalog.len(), "Symbol catalog loaded");

    let handlers = ChartHandlers::new(client, config.dashboard.interval, config.dashboard.period);
    let mut app = App::new(catalog, &config.dashboard);

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app, &handlers, &config).await;
    restore_terminal(&mut terminal)?;

    if let Err(ref e) = result {
        error!(error = %e, "Dashboard exited with an error");
    }
    result
}

/// Sends log output to the configured file so it never draws over the UI.
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let file = File::create(&logging.file).map_err(|e| {
        OidashError::Io(format!(
            "failed to create log file {}: {e}",
            logging.file.display()
        ))
    })?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(logging.level)
        .init();

    Ok(())
}

async fn run(
    terminal: &mut Tui,
    app: &mut App,
    handlers: &ChartHandlers,
    config: &AppConfig,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx, TICK_INTERVAL_MS);

    loop {
        draw(terminal, app)?;

        let Some(message) = rx.recv().await else {
            break;
        };

        if let Some(action) = update(app, message) {
            perform(terminal, app, handlers, config, action).await?;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(terminal: &mut Tui, app: &App) -> Result<()> {
    terminal
        .draw(|frame| render(frame, app))
        .map_err(|e| OidashError::Io(format!("failed to draw frame: {e}")))?;
    Ok(())
}

async fn perform(
    terminal: &mut Tui,
    app: &mut App,
    handlers: &ChartHandlers,
    config: &AppConfig,
    action: Action,
) -> Result<()> {
    match action {
        Action::SubmitPrice(request) => {
            app.loading = Some(Tab::Prices);
            draw(terminal, app)?;
            let result = handlers.price_chart(&request).await;
            app.apply_figure(Tab::Prices, result);
        }
        Action::SubmitOpenInterest(request) => {
            app.loading = Some(Tab::OpenInterest);
            draw(terminal, app)?;
            let result = handlers.open_interest_chart(&request).await;
            app.apply_figure(Tab::OpenInterest, result);
        }
        Action::Export(tab) => {
            let path = config.dashboard.export_dir.join(tab.export_file_name());
            match app.tab_state(tab).panel.figure.export(&path) {
                Ok(()) => app.show_info(format!("Saved {}", path.display())),
                Err(e) => app.show_error(e.to_string()),
            }
        }
    }
    Ok(())
}
