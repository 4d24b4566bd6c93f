use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::warn;

use crate::{
    clock::SimulationClock,
    config::{self, SimConfig},
    core::{Arena, SharedArena},
    error::ArenaError,
    render,
    types::{ArenaSize, BodySnapshot, ColorId},
};

/// Arena units per terminal column and row. Rows are roughly twice as tall
/// as columns are wide.
const UNITS_PER_COLUMN: f32 = 10.0;
const UNITS_PER_ROW: f32 = 20.0;

pub fn run(config: SimConfig) -> Result<(), Box<dyn Error>> {
    let arena = Arena::new(config)?.into_shared();
    let mut clock = SimulationClock::new(Arc::clone(&arena), config::SIM_HZ);
    clock.start()?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &arena);
    clock.stop();
    shutdown_terminal(&mut terminal)?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    arena: &SharedArena,
) -> Result<(), Box<dyn Error>> {
    let started = Instant::now();
    let render_interval = Duration::from_secs_f32(1.0 / config::RENDER_HZ);
    let mut last_render = Instant::now()
        .checked_sub(render_interval)
        .unwrap_or_else(Instant::now);
    let mut ui_state = UiState::new();

    loop {
        while event::poll(Duration::from_millis(0))? {
            let CrosstermEvent::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let mut arena = arena.lock().map_err(ArenaError::from)?;
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Left | KeyCode::Char('-') => {
                    let target = arena.target_population().saturating_sub(1);
                    arena.set_population(target);
                }
                KeyCode::Right | KeyCode::Char('+') => {
                    let target = arena.target_population() + 1;
                    arena.set_population(target);
                }
                KeyCode::Char('d') | KeyCode::Delete | KeyCode::Backspace => {
                    arena.press_delete(started.elapsed().as_secs_f64());
                }
                _ => {}
            }
        }

        if last_render.elapsed() >= render_interval {
            let (arena_size, stats) = {
                let arena = arena.lock().map_err(ArenaError::from)?;
                arena.snapshot(&mut ui_state.snapshot);
                (arena.size(), arena.stats())
            };

            let mut viewport = ui_state.viewport;
            terminal.draw(|frame| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),
                        Constraint::Min(3),
                        Constraint::Length(3),
                    ])
                    .split(frame.size());

                let header = Paragraph::new(format!(
                    "people: {} | ticks: {} | t: {:.1}s | overlaps: {}",
                    stats.target_population, stats.ticks, stats.sim_time, stats.overlapping_pairs,
                ))
                .block(Block::default().borders(Borders::ALL).title("dokusai"));
                frame.render_widget(header, chunks[0]);

                let inner = Block::default().borders(Borders::ALL).inner(chunks[1]);
                viewport = render::Viewport {
                    width: inner.width,
                    height: inner.height,
                };
                render::draw(&ui_state.snapshot, arena_size, viewport, &mut ui_state.framebuf);
                let arena_view = Paragraph::new(frame_lines(&ui_state.framebuf))
                    .block(Block::default().borders(Borders::ALL).title("Arena"));
                frame.render_widget(arena_view, chunks[1]);

                let footer = Paragraph::new(slider_line(stats.target_population))
                    .block(Block::default().borders(Borders::ALL).title("Controls"));
                frame.render_widget(footer, chunks[2]);
            })?;

            if viewport.width != ui_state.viewport.width
                || viewport.height != ui_state.viewport.height
            {
                ui_state.viewport = viewport;
                let size = ArenaSize::new(
                    viewport.width as f32 * UNITS_PER_COLUMN,
                    viewport.height as f32 * UNITS_PER_ROW,
                );
                let mut arena = arena.lock().map_err(ArenaError::from)?;
                if let Err(err) = arena.set_size(size) {
                    warn!(%err, "keeping previous arena size");
                }
            }
            last_render = Instant::now();
        }

        std::thread::sleep(Duration::from_millis(5));
    }
}

fn frame_lines(framebuf: &render::FrameBuffer) -> Vec<Line<'static>> {
    (0..framebuf.height())
        .map(|y| {
            let spans: Vec<Span> = (0..framebuf.width())
                .map(|x| {
                    let cell = framebuf.get(x, y);
                    Span::styled(cell.ch.to_string(), Style::default().fg(color_for(cell.color)))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn slider_line(target: usize) -> String {
    let filled = "#".repeat(target);
    let empty = "-".repeat(config::MAX_POPULATION - target.min(config::MAX_POPULATION));
    format!("[{filled}{empty}] {target:>2} | ←→: people | d: DOKUSAI | q: quit")
}

fn shutdown_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

struct UiState {
    framebuf: render::FrameBuffer,
    snapshot: Vec<BodySnapshot>,
    viewport: render::Viewport,
}

impl UiState {
    fn new() -> Self {
        Self {
            framebuf: render::FrameBuffer::new(0, 0),
            snapshot: Vec::with_capacity(config::MAX_POPULATION + 1),
            viewport: render::Viewport {
                width: 0,
                height: 0,
            },
        }
    }
}

fn color_for(color: ColorId) -> Color {
    match color {
        ColorId::Primary => Color::Rgb(255, 165, 0),
        ColorId::Other => Color::Gray,
        ColorId::Background => Color::Reset,
    }
}
