use adorn_gallery::category::Category;
use adorn_gallery::config::{self, ConfigOverrides, PipelineConfig};
use adorn_gallery::{gallery, ingest, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "adorn-gallery")]
#[command(about = "Optimize portfolio photos and build the gallery manifest")]
#[command(long_about = "\
Optimize portfolio photos and build the gallery manifest

Drop photos into one folder per category, then run the optimizer. Every
image is resized to at most --max-width pixels and written as WebP and
JPEG; the manifest lists them in file-name order.

Input structure:

  images-to-optimize/
  ├── firstbirthday/
  ├── musicconcert/
  ├── familysession/
  ├── housewarming/
  ├── maternity/
  ├── newborn/
  ├── portraits/
  └── wedding/
      ├── a.jpg                    # -> wedding-1.webp + wedding-1.jpg
      └── b.png                    # -> wedding-2.webp + wedding-2.jpg

Output: public/gallery/<category>/<category>-N.{webp,jpg} and
public/gallery/manifest.json.

Run 'adorn-gallery gen-config' to generate a documented gallery.toml.
Set RUST_LOG=debug for per-file diagnostics.")]
#[command(version)]
struct Cli {
    /// Config file (missing file means stock defaults)
    #[arg(long, default_value = config::CONFIG_FILENAME, global = true)]
    config: PathBuf,

    /// Input root with one folder per category
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// Output root for images and manifest
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Maximum output width in pixels
    #[arg(long, global = true)]
    max_width: Option<u32>,

    /// Encoding quality (1-100)
    #[arg(long, global = true)]
    quality: Option<u32>,

    /// Only ingest these categories (repeatable)
    #[arg(long = "category", global = true)]
    categories: Vec<Category>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Resize and encode all category folders and write the manifest (default)
    Optimize,
    /// Create the input folder for every category
    Init,
    /// Print a stock gallery.toml with all options documented
    GenConfig,
    /// Load a manifest the way the site does and list its galleries
    Show {
        /// Manifest path or http(s) URL [default: <output>/manifest.json]
        source: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    let overrides = ConfigOverrides {
        input_dir: cli.input,
        output_dir: cli.output,
        max_width: cli.max_width,
        quality: cli.quality,
        categories: cli.categories,
    };
    let load = || -> Result<PipelineConfig, config::ConfigError> {
        config::load_config(&cli.config)?.with_overrides(&overrides)
    };

    match cli.command.unwrap_or(Command::Optimize) {
        Command::Optimize => optimize(&load()?)?,
        Command::Init => {
            let created = ingest::scaffold_input_dirs(&load()?)?;
            output::print_init(&created);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Show { source } => {
            let location = match source {
                Some(location) => location,
                None => load()?.manifest_path().display().to_string(),
            };
            let mut site = gallery::Gallery::new();
            site.try_load(&*gallery::source_for(&location))?;
            output::print_gallery(&site, &location);
        }
    }

    Ok(())
}

fn optimize(config: &PipelineConfig) -> Result<(), Box<dyn std::error::Error>> {
    init_thread_pool(&config.processing);
    output::print_banner(config);

    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_ingest_event(&event);
        }
    });
    let result = ingest::ingest(config, Some(tx));
    printer.join().map_err(|_| "output thread panicked")?;

    output::print_ingest_summary(&result?);
    Ok(())
}

/// Library diagnostics go to stderr; `RUST_LOG` overrides the default level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
