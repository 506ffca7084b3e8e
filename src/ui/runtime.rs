use crate::node::NavHost;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use std::io;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Drive the tree until the user quits, then save and release it.
pub async fn run(host: NavHost, tick_rate: Duration) -> io::Result<()> {
    let (mut terminal, guard) = setup_terminal()?;
    let shutdown = CancellationToken::new();
    let mut events = EventHandler::new(tick_rate, shutdown.clone());
    let mut app = App::new(host);

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(AppEvent::Key(key)) => handle_key(&mut app, key),
                Some(AppEvent::Tick) => app.on_tick(),
                Some(AppEvent::Resize(cols, rows)) => {
                    tracing::debug!(cols, rows, "Terminal resized");
                }
                None => break,
            },
            Some(command) = app.next_command() => app.on_command(command),
        }
    }

    shutdown.cancel();
    drop(guard);
    app.shutdown().map_err(io::Error::other)
}
