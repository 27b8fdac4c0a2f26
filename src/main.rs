use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use skyray::config::{AspectRatio, RenderConfig};

/// Renders a sky gradient through a pinhole camera and writes it as a
/// plain-text PPM.
#[derive(Debug, Parser)]
#[command(name = "skyray", version)]
struct Cli {
    /// TOML file with render settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(short, long)]
    width: Option<usize>,

    /// Aspect ratio, either "16:9" or a number
    #[arg(short, long)]
    aspect_ratio: Option<AspectRatio>,

    /// Write the image here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render rows in parallel
    #[arg(long)]
    parallel: bool,

    /// Suppress the scanline countdown on stderr
    #[arg(short, long)]
    quiet: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Command-line values win over the config file.
    fn apply(&self, config: &mut RenderConfig) {
        if let Some(width) = self.width {
            config.image_width = width;
        }
        if let Some(ratio) = self.aspect_ratio {
            config.aspect_ratio = ratio;
        }
        if self.parallel {
            config.parallel = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("couldn't load {}", path.display()))?,
        None => RenderConfig::default(),
    };
    cli.apply(&mut config);

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("couldn't create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let progress: Box<dyn Write + Send> = if cli.quiet {
        Box::new(io::sink())
    } else {
        Box::new(io::stderr())
    };

    skyray::render(&config, &mut out, progress)?;
    Ok(())
}
