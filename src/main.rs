use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use tracing::{error, info};

use dockdeck::app::App;
use dockdeck::config::Config;
use dockdeck::docker::DockerClient;
use dockdeck::logging::init_logging;
use dockdeck::render_loop::RenderLoop;
use dockdeck::tui::{self, Tui};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_logging(&config)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting dockdeck");

    let docker = DockerClient::connect(config.docker_host.as_deref())
        .context("Failed to connect to Docker")?;

    let mut render_loop = RenderLoop::new();
    let mut app = App::new(Arc::new(docker), render_loop.updater(), &config);

    // Initialize terminal
    let mut terminal = tui::init().context("Failed to initialize terminal")?;
    app.start();

    let result = run(&mut terminal, &mut app, &mut render_loop).await;

    // Restore terminal
    tui::restore().context("Failed to restore terminal")?;

    if let Err(e) = &result {
        error!(error = %e, "stopped on fatal error");
    }
    result
}

/// Main event loop: queued updates and key presses, one at a time
async fn run(terminal: &mut Tui, app: &mut App, render_loop: &mut RenderLoop<App>) -> Result<()> {
    let mut events = EventStream::new();

    loop {
        render_loop.run_pending(app)?;
        terminal.draw(|frame| app.render(frame))?;

        if app.should_quit {
            break;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key)?;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                None => break,
            },
            callback = render_loop.recv() => match callback {
                Some(callback) => callback(app)?,
                None => break,
            },
        }
    }

    info!("shutting down");
    Ok(())
}
