//! Terminal match-3 runner (default binary).
//!
//! This is the primary gameplay entrypoint. It uses crossterm for keyboard
//! and pointer input and a custom framebuffer-based renderer (no ratatui
//! widgets/layout).

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};

use tui_match3::core::{snapshot_into, GameSession, GameSnapshot};
use tui_match3::input::{handle_key_event, should_quit, GestureTracker};
use tui_match3::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_match3::types::{GameEvent, BOARD_WIDTH, TICK_MS};

fn main() -> Result<()> {
    let bell = !std::env::args().any(|arg| arg == "--quiet" || arg == "-q");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, bell);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, bell: bool) -> Result<()> {
    let mut session = GameSession::new(time_seed());
    let mut view = GameView::default();
    let mut tracker = GestureTracker::new();
    let mut snap = GameSnapshot::new();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut second_ms: u32 = 0;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        snapshot_into(&session, &mut snap);
        view.render_into(&snap, viewport, &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = handle_key_event(key) {
                            session.apply_action(action);
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    let geo = view.geometry(viewport);
                    let (gx, gy) = geo.gesture_units(mouse.column, mouse.row);
                    match mouse.kind {
                        MouseEventKind::Down(MouseButton::Left) => {
                            // A click also starts a waiting session.
                            if !session.started() {
                                session.start();
                            }
                            match geo.hit_test(mouse.column, mouse.row) {
                                Some(cell) => tracker.press(cell, gx, gy),
                                None => tracker.cancel(),
                            }
                        }
                        MouseEventKind::Up(MouseButton::Left) => {
                            let cell = geo.hit_test(mouse.column, mouse.row);
                            if let Some(request) = tracker.release(cell, gx, gy, BOARD_WIDTH) {
                                session.apply_swap(request);
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            session.tick(TICK_MS);
            view.tick();

            second_ms += TICK_MS;
            if second_ms >= 1000 {
                second_ms -= 1000;
                session.second_tick();
            }

            let events = session.take_events();
            if !events.is_empty() {
                view.note_events(&events);
                let matched = events
                    .iter()
                    .any(|e| matches!(e, GameEvent::MatchRound { .. }));
                if bell && matched {
                    let _ = term.bell();
                }
            }
        }
    }
}

/// Seed from wall time so every launch plays a different board.
fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
