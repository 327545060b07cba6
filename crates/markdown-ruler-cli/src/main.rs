use anyhow::{Context, Result};
use clap::Parser;
use markdown_ruler_config::Config;
use markdown_ruler_engine::{Env, Preset, snapshot};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "markdown-ruler")]
#[command(about = "Render Markdown to HTML with a configurable rule chain")]
struct Args {
    /// Markdown file to render; reads stdin when omitted
    file: Option<PathBuf>,

    /// Config file to use instead of ~/.config/markdown-ruler/config.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preset to start from: default, commonmark or zero
    #[arg(long)]
    preset: Option<Preset>,

    /// Treat the input as a single inline run (no paragraphs)
    #[arg(long)]
    inline: bool,

    /// Print the token stream instead of HTML
    #[arg(long)]
    tokens: bool,

    /// Enable a rule by name (repeatable)
    #[arg(long, value_name = "RULE")]
    enable: Vec<String>,

    /// Disable a rule by name (repeatable)
    #[arg(long, value_name = "RULE")]
    disable: Vec<String>,

    /// Log rule chain changes and config loading
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            let expanded = Config::expand_path(path).unwrap_or_else(|| path.to_path_buf());
            match Config::load_from_path(&expanded)? {
                Some(config) => config,
                None => anyhow::bail!("Config file not found: {}", expanded.display()),
            }
        }
        None => Config::load()?.unwrap_or_default(),
    };
    Ok(config)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(file) => std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(preset) = args.preset {
        config.preset = preset;
    }
    config.enable.extend(args.enable);
    config.disable.extend(args.disable);
    log::debug!("Using preset {}", config.preset.name());

    let md = config.build()?;
    let input = read_input(args.file.as_deref())?;

    let output = if args.tokens {
        let mut env = Env::default();
        let tokens = if args.inline {
            md.parse_inline(&input, &mut env)
        } else {
            md.parse(&input, &mut env)
        };
        snapshot::dump(&tokens)
    } else if args.inline {
        md.render_inline(&input)
    } else {
        md.render(&input)
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
