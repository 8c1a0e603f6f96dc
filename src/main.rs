use clap::Parser;
use color_eyre::{Result, eyre::WrapErr};
use crossterm::{
    cursor::Show,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use space_shooter::{App, Context, Labels, Settings, SystemClock, World, font};

fn main() -> Result<()> {
    color_eyre::install()?;

    let settings = Settings::parse();
    settings.validate()?;
    init_logging(&settings)?;

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let labels = Labels::for_typeface(font::detect_from_env());
    let world = World::new(Context::new(&settings, SystemClock::new(), rng));

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    tracing::info!(supports_keyboard_enhancement, "terminal capabilities");

    let mut guard = TerminalGuard::enter(labels.caption, supports_keyboard_enhancement)?;
    let result = run(world, labels, settings.fps, supports_keyboard_enhancement);
    let restored = guard.restore();

    if let Err(err) = &result {
        tracing::error!(error = %err, "game loop failed");
    }
    first_error(result, restored)
}

fn run(
    world: World<SystemClock, StdRng>,
    labels: Labels,
    fps: u32,
    reports_release: bool,
) -> Result<()> {
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    App::new(world, labels, fps, reports_release).run(&mut terminal)
}

/// Owns the raw mode / alternate screen setup. Whatever was switched on is
/// switched off again on `restore` or on drop, whichever comes first.
struct TerminalGuard {
    active: bool,
    keyboard_enhancement: bool,
}

impl TerminalGuard {
    fn enter(caption: &str, keyboard_enhancement: bool) -> Result<Self> {
        enable_raw_mode()?;
        // From here on an early return drops the guard and undoes raw mode
        let mut guard = Self {
            active: true,
            keyboard_enhancement: false,
        };

        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, SetTitle(caption))?;

        // Enable keyboard enhancement AFTER entering alternate screen
        if keyboard_enhancement {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
            guard.keyboard_enhancement = true;
        }

        Ok(guard)
    }

    /// Runs every teardown step even if an earlier one fails and reports the
    /// first failure
    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut stdout = stdout();
        let flags = if self.keyboard_enhancement {
            execute!(stdout, PopKeyboardEnhancementFlags)
        } else {
            Ok(())
        };
        let raw = disable_raw_mode();
        let screen = execute!(stdout, LeaveAlternateScreen, Show);

        flags
            .and(raw)
            .and(screen)
            .wrap_err("failed to restore the terminal")
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            tracing::warn!(error = %err, "terminal teardown failed");
        }
    }
}

/// The game's own error wins over a teardown error that followed it
fn first_error(result: Result<()>, restored: Result<()>) -> Result<()> {
    result.and(restored)
}

/// Diagnostics go to a file; stdout belongs to the game
fn init_logging(settings: &Settings) -> Result<()> {
    let file = File::create(&settings.log_file)
        .wrap_err_with(|| format!("cannot create log file {}", settings.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
