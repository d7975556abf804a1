// CLI output formatting with consistent styling using indicatif and colored.
// Textual output goes through println!/eprintln!; tracing is reserved for diagnostics on stderr.

use crate::provider::Usage;
use crate::utils::languages::language_name;
use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

const PD_TICK: Duration = Duration::from_millis(100);

/// Keys listed per locale in a dry run before the rest is summarized.
pub const DRY_RUN_PREVIEW: usize = 10;

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, hidden progress bars).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbosity` picks warn, info or debug.
pub fn init_logging(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (tests calling run twice) is not an error worth reporting.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!is_e2e())
                .without_time(),
        )
        .try_init();
}

pub fn create_progress_bar(len: u64, msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn print_header() {
    println!("{}", "Translation Autofill".bold());
    println!();
}

pub fn print_dry_run_notice() {
    println!("{}", "DRY RUN MODE - No files will be modified".yellow());
    println!();
}

pub fn print_scanning() {
    println!("{}", "› Scanning for translation files...".cyan());
}

pub fn print_found_files(count: usize) {
    println!(
        "  {} Found {} translation file(s)",
        "▸".cyan(),
        count.to_string().white()
    );
    println!();
}

pub fn print_validating() {
    println!("{}", "› Validating translations...".cyan());
}

pub fn print_all_complete() {
    println!();
    println!("{}", "✓ All translations are complete!".green());
}

pub fn print_found_missing(count: usize) {
    println!(
        "  {} Found {} missing translation(s)",
        "▸".cyan(),
        count.to_string().white()
    );
    println!();
}

pub fn print_target_is_source(locale: &str) {
    eprintln!(
        "{} {}",
        "Skipping target locale".yellow(),
        format!("{locale} (same as the source locale)").yellow()
    );
}

/// Dry-run preview of the keys a locale would receive.
pub fn print_would_translate(locale: &str, keys: &[String]) {
    println!(
        "{} {} key(s) for locale {}:",
        "Would translate".yellow(),
        keys.len(),
        locale.cyan()
    );
    for key in keys.iter().take(DRY_RUN_PREVIEW) {
        println!("  * {}", key);
    }
    if keys.len() > DRY_RUN_PREVIEW {
        println!("  ... and {} more", keys.len() - DRY_RUN_PREVIEW);
    }
    println!();
}

pub fn print_cancelled() {
    println!("{}", "Operation cancelled by user.".yellow());
}

pub fn print_translating(locale: &str) {
    println!();
    println!(
        "{}",
        format!("› Translating to {} ({})", language_name(locale), locale).cyan()
    );
}

pub fn print_nothing_to_translate(locale: &str) {
    eprintln!(
        "{} {}",
        "No valid texts to translate for".yellow(),
        format!("{locale} (all source texts are empty)").yellow()
    );
}

pub fn print_translated_key(key: &str, source: &str, translation: &str) {
    println!(
        "  {} {} \"{}\" → \"{}\"",
        "•".green(),
        format!("{key}:").dimmed(),
        source,
        translation
    );
}

pub fn print_saved(path: &Path) {
    println!("  {} Saved to {}", "✓".green(), path.display());
}

pub fn print_report(keys: usize, locales: usize) {
    println!();
    println!(
        "{} {} key(s) translated in {} language(s)",
        "✓".green(),
        keys,
        locales
    );
}

pub fn print_usage(usage: &Usage) {
    println!("{} {usage}", "API Usage:".dimmed());
}
