//! # talkpack CLI
//!
//! Command-line interface for the talkpack library. The rendered output goes
//! to the output file or stdout; the progress summary goes to stderr.

use std::io::Write;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use talkpack::TalkpackError;
use talkpack::cli::Args;
use talkpack::core::Preprocessor;
use talkpack::format::{OutputFormat, to_format_string};
use talkpack::parser::parse_file;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), TalkpackError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let window = args.window()?;
    let config = args.preprocess_config();
    let lib_format: OutputFormat = args.format.into();

    eprintln!("📦 talkpack v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("📂 Input:   {}", args.input.display());
    match &args.output {
        Some(path) => eprintln!("💾 Output:  {}", path.display()),
        None => eprintln!("💾 Output:  <stdout>"),
    }
    eprintln!("📄 Format:  {}", lib_format);
    match &window {
        Some(spec) => eprintln!("📅 Window:  {}", spec.mode()),
        None => eprintln!("📅 Window:  whole conversation"),
    }
    if let Some(ref target) = args.target {
        eprintln!("👤 Target:  {}", target);
    }
    if config.mask_pii {
        eprintln!("🔒 Masking personal data");
    }
    eprintln!();

    eprintln!("⏳ Parsing...");
    let parse_start = Instant::now();
    let parsed = parse_file(&args.input, &config.parser)?;
    eprintln!(
        "   {} export, {} messages over {} days ({:.2}s)",
        parsed.format,
        parsed.store.message_count(),
        parsed.store.day_count(),
        parse_start.elapsed().as_secs_f64()
    );

    let preprocessor = Preprocessor::with_config(config);
    let mut result = preprocessor.preprocess_store(
        parsed.format,
        &parsed.store,
        args.target.as_deref(),
        window.as_ref(),
    );
    if args.require_target {
        result = result.require_target()?;
    }

    let rendered = to_format_string(&result, lib_format)?;
    match &args.output {
        Some(path) => std::fs::write(path, rendered.as_bytes())?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            stdout.flush()?;
        }
    }

    let stats = &result.stats;
    eprintln!();
    eprintln!("✅ Done!");
    eprintln!();
    eprintln!("📊 Summary:");
    eprintln!("   Participants: {}", stats.participant_count);
    eprintln!("   Original:     {} messages", stats.total_messages);
    if let (Some(days), Some(messages)) = (stats.filtered_days, stats.filtered_messages) {
        eprintln!("   Windowed:     {} messages over {} days", messages, days);
    }
    if let (Some(from), Some(to)) = (stats.window_from, stats.window_to) {
        eprintln!("   Range:        {} ~ {}", from, to);
    }
    if let Some(ref target) = stats.target {
        match stats.target_message_count {
            Some(count) if count > 0 => eprintln!("   Target:       {} ({} messages)", target, count),
            _ => eprintln!("   Target:       {} not found in window", target),
        }
    }
    eprintln!(
        "   Output:       {} chars{}",
        stats.output_chars,
        if stats.truncated { " (truncated)" } else { "" }
    );

    eprintln!();
    eprintln!("⚡ Performance:");
    eprintln!("   Total time:  {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
