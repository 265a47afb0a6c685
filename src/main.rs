// src/main.rs
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use fontmatch::{
    load_config, CharSet, DummyFontSystem, FileConfig, FontEngine, FontRequest, StyleHint, Weight,
};
use log::{debug, info};

/// Resolve a font request against a list of installed font names
#[derive(Parser, Debug)]
#[command(name = "fontmatch", version, about)]
struct Cli {
    /// File with one font name per line, such as `xlsfonts` output
    #[arg(long, value_name = "FILE")]
    fonts: PathBuf,

    /// TOML file with engine settings and substitutions
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, default_value = "")]
    family: String,

    /// Point size in tenths of a point
    #[arg(long, default_value_t = 120, allow_negative_numbers = true)]
    size_deci: i32,

    /// light, normal, demibold, bold, black or 0-99
    #[arg(long, default_value = "normal")]
    weight: Weight,

    #[arg(long)]
    italic: bool,

    #[arg(long)]
    fixed: bool,

    /// latin1 ... latin9, koi8r or any
    #[arg(long, default_value = "latin1")]
    charset: CharSet,

    /// helvetica, times, courier, oldenglish, system or any
    #[arg(long, default_value = "helvetica")]
    style: StyleHint,

    /// Treat the family as a literal font name or pattern
    #[arg(long)]
    raw: bool,

    /// Extra substitution, may be repeated
    #[arg(long = "substitute", value_name = "FROM=TO")]
    substitutions: Vec<String>,

    /// Print the substitution table and exit
    #[arg(long)]
    list_substitutions: bool,
}

fn read_font_list(path: &Path) -> Result<DummyFontSystem> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read font list {}", path.display()))?;

    let system = DummyFontSystem::with_fonts(
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('!') && !line.starts_with('#')),
    );
    debug!("Read {} font names from {}", system.font_count(), path.display());
    Ok(system)
}

fn parse_substitution(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
            Ok((from.trim(), to.trim()))
        }
        _ => bail!("Substitution must look like FROM=TO, got '{}'", arg),
    }
}

fn main() -> Result<()> {
    // Initialize logger with environment variable control (RUST_LOG)
    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => FileConfig::default(),
    };

    let system = read_font_list(&cli.fonts)?;
    let mut engine = FontEngine::new(system, file_config.engine)?;
    engine.substitutions_mut()?.extend(file_config.substitutions);
    for arg in &cli.substitutions {
        let (from, to) = parse_substitution(arg)?;
        engine.insert_substitution(from, to)?;
    }

    if cli.list_substitutions {
        for (family, replacement) in engine.substitutions().iter() {
            println!("{} -> {}", family, replacement);
        }
        engine.shutdown()?;
        return Ok(());
    }

    let request = FontRequest::new(&cli.family, cli.size_deci)?
        .with_weight(cli.weight)
        .with_italic(cli.italic)
        .with_fixed_pitch(cli.fixed)
        .with_charset(cli.charset)
        .with_style_hint(cli.style)
        .with_raw_mode(cli.raw);

    let info = engine
        .font_info(&request)
        .with_context(|| format!("Failed to resolve font request {}", request.key()))?;

    println!("resource: {}", info.resource_name);
    println!("exact:    {}", info.exact_match);
    println!("font:     {}", info);

    let stats = engine.cache_stats();
    info!(
        "{} loads, {} cached resources, cost {}",
        stats.loads, stats.entries, stats.total_cost
    );
    engine.shutdown()?;
    Ok(())
}
