use std::io;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use anyhow::bail;
use crossterm::event;
use tracing::debug;
use tracing::info;
use tracing_subscriber::EnvFilter;

use conway::canvas::Canvas;
use conway::config::Config;
use conway::grid::Grid;
use conway::render;
use conway::term;
use conway::term::Event;
use conway::term::Terminal;

fn main() -> anyhow::Result<()> {
    // The terminal shows the animation, so logs stay off unless `RUST_LOG` asks for them (and
    // stderr is best redirected to a file).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    debug!(?config);

    let mut terminal = Terminal::acquire().context("Failed to acquire a surface to draw on")?;

    let (pw, ph) = terminal.pixel_size();
    let (width, height) = render::grid_dimensions((pw, ph), config.cell_size);

    if width == 0 || height == 0 {
        bail!(
            "A {pw}x{ph} pixel surface cannot fit a single {0}x{0} cell",
            config.cell_size
        );
    }

    info!("{height}x{width}");

    let mut canvas = Canvas::new(pw, ph, config.background);

    let mut grid = Grid::random(width, height, config.fill_probability);

    render::draw_grid(&mut canvas, &grid, &config);
    terminal.present(&mut canvas)?;

    let mut generation: u64 = 0;
    let mut next_tick = Instant::now() + config.tick;

    loop {
        // Wait for events for as long as is left of this tick
        let timeout = next_tick.saturating_duration_since(Instant::now());

        if event::poll(timeout)? {
            if let Some(Event::Exit) = term::convert_event(event::read()?) {
                break;
            }

            continue;
        }

        grid = grid.next_generation();
        generation += 1;

        render::draw_grid(&mut canvas, &grid, &config);
        terminal.present(&mut canvas)?;

        debug!(generation, population = grid.population());

        next_tick = schedule_next(next_tick, Instant::now(), config.tick);
    }

    info!("exiting after {generation} generations");

    Ok(())
}

/// Deadline of the tick after the one due at `due`. A late tick pushes the schedule back instead
/// of being followed by a burst of catch-up ticks.
fn schedule_next(due: Instant, now: Instant, tick: Duration) -> Instant {
    due.max(now) + tick
}
