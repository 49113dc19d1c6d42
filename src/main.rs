//! A single-page portfolio deck that lives in the terminal.
//!
//! Four full-screen sections paginated by the mouse wheel, with a
//! pointer-reactive particle field on top.  Run the binary to launch it;
//! `--effect` and `--skip-boot` tweak the start-up behaviour.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{ActiveView, AppState},
};
use crate::core::particles::FieldMode;
use crate::ui::{
    boot::BootOverlay, cursor_fx::CursorFx, hint::FooterHint, layout::AppLayout, nav::NavRail,
    popup::SettingsPopup, stage::StageWidget,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "A portfolio deck in the terminal")]
struct Cli {
    /// Animation frame rate, clamped to 10–120.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Particle effect to start with (trail, grid or off); overrides the
    /// saved preference for this run.
    #[arg(long)]
    effect: Option<FieldMode>,

    /// Go straight to the deck, skipping the boot intro.
    #[arg(long)]
    skip_boot: bool,
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only emits when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let fps = cli.fps.clamp(10, 120);

    let config = config::AppConfig::load();
    let effect = cli.effect.unwrap_or(config.effect);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode().context("enable raw mode")?;
    execute!(stderr(), EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, config, effect, cli.skip_boot, fps).await;

    // ── teardown (runs on the error path too) ─────────────────
    disable_raw_mode().context("disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("leave alternate screen")?;
    terminal.show_cursor()?;

    result
}

// ───────────────────────────────────────── event loop ────────

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    config: config::AppConfig,
    effect: FieldMode,
    skip_boot: bool,
    fps: u32,
) -> Result<()> {
    let size = terminal.size()?;
    let mut state = AppState::new(
        config,
        effect,
        skip_boot,
        size.width,
        size.height,
        Instant::now(),
    );

    let mut events = spawn_event_reader(Duration::from_millis(1000 / fps as u64));

    loop {
        // ── draw first ─────────────────────────────────────────
        // Render before waiting on input so every frame reflects the
        // freshest simulation state.
        terminal.draw(|frame| {
            let area = frame.area();
            let layout = AppLayout::from_area(area);
            let smoothed = state.scroll.smoothed();

            frame.render_widget(
                StageWidget {
                    sections: &state.sections,
                    scrambles: &state.scrambles,
                    theme: &state.theme,
                    scroll: smoothed,
                },
                layout.stage,
            );
            frame.render_widget(
                CursorFx {
                    field: &state.field,
                    theme: &state.theme,
                },
                layout.stage,
            );

            let dots = layout.dot_rects(state.sections.len());
            frame.render_widget(
                NavRail {
                    dots: &dots,
                    active: state.active_section(),
                    theme: &state.theme,
                },
                layout.rail,
            );

            frame.render_widget(
                FooterHint {
                    hint: state.config.footer_hint(),
                    theme: &state.theme,
                    tick: state.hint_tick,
                    show_scroll_cue: state.active_section() == 0 && state.scroll.raw() == 0.0,
                },
                layout.footer,
            );

            if state.active_view == ActiveView::Settings {
                frame.render_widget(SettingsPopup { state: &state }, area);
            }
            if let Some(boot) = &state.boot {
                frame.render_widget(
                    BootOverlay {
                        boot,
                        theme: &state.theme,
                        now: Instant::now(),
                    },
                    area,
                );
            }
        })?;

        // The bell rides behind the frame it announces.
        if state.bell_pending {
            state.bell_pending = false;
            let mut out = stderr();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }

        let Some(event) = events.recv().await else {
            break;
        };
        apply_event(&mut state, event);
        // Batch-drain whatever else is already queued so a mouse-move
        // flood costs one redraw, not one per sample.
        while let Ok(event) = events.try_recv() {
            apply_event(&mut state, event);
        }

        // One animation step per frame, clocked by real elapsed time.
        handler::handle_tick(&mut state, Instant::now());

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

fn apply_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Key(k) => handler::handle_key(state, k),
        AppEvent::Mouse(m) => handler::handle_mouse(state, m),
        AppEvent::Resize(w, h) => handler::handle_resize(state, w, h),
        AppEvent::Tick => {}
    }
}
