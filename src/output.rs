use std::{fs, io::Write, path::Path};

use anyhow::Context;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    /// Colors are on unless `--no-color` is passed or `NO_COLOR` is set.
    pub fn detect(no_color: bool) -> Self {
        ColorMode(!no_color && std::env::var_os("NO_COLOR").is_none())
    }

    pub fn enabled(&self) -> bool {
        self.0
    }
}

pub fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// `✓ rendered ✗ skipped`
pub fn print_summary(
    w: &mut dyn Write,
    rendered: usize,
    skipped: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(
            w,
            "{} {}",
            format!("✓ {rendered}").green(),
            format!("✗ {skipped}").red()
        )
    } else {
        writeln!(w, "✓ {rendered} ✗ {skipped}")
    }
}

pub fn print_error(w: &mut dyn Write, err: &anyhow::Error, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {err:#}", "error:".red().bold())
    } else {
        writeln!(w, "error: {err:#}")
    }
}

/// Send rendered HTML to `path`, or stdout when no path is given.
pub fn emit(path: Option<&Path>, html: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
