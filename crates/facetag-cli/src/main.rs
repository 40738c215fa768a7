use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use facebox_client::{FaceboxClient, RecognitionService};
use facetag_core::{IdentifyOptions, TagOptions, TrainOptions};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

const DEFAULT_FACES_DIR: &str = "/pfs/identify";
const DEFAULT_IMAGES_DIR: &str = "/pfs/unidentified";
const DEFAULT_TAGS_DIR: &str = "/pfs/tags";
const DEFAULT_OUT_DIR: &str = "/pfs/out";

#[derive(Parser)]
#[command(name = "facetag", about = "Train, identify and tag faces with facebox")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Facebox base URL (overrides config and FACETAG_FACEBOX_URL)
    #[arg(long, global = true)]
    facebox_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Teach facebox labeled images and export its state
    Train {
        /// Directory containing the training images (<person><id>.<ext>)
        #[arg(long, alias = "inDir")]
        in_dir: PathBuf,
        /// Output directory for state.facebox
        #[arg(long, alias = "outDir")]
        out_dir: PathBuf,
        /// Pause after each image, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Load a trained state and write detection results for each image
    Identify {
        /// Directory containing state.facebox
        #[arg(long, alias = "inModelDir")]
        in_model_dir: PathBuf,
        /// Directory containing the images to identify
        #[arg(long, alias = "inImageDir")]
        in_image_dir: PathBuf,
        /// Output directory for the JSON results
        #[arg(long, alias = "outDir")]
        out_dir: PathBuf,
    },
    /// Overlay tag images on matched faces
    Tag {
        /// Directory containing the JSON results
        #[arg(long, default_value = DEFAULT_FACES_DIR)]
        faces_dir: PathBuf,
        /// Directory containing the source images
        #[arg(long, default_value = DEFAULT_IMAGES_DIR)]
        images_dir: PathBuf,
        /// Directory containing <name>.jpg tag images
        #[arg(long, default_value = DEFAULT_TAGS_DIR)]
        tags_dir: PathBuf,
        /// Output directory for tagged images
        #[arg(long, default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,
        /// JPEG quality (1-100)
        #[arg(long)]
        quality: Option<u8>,
    },
    /// Show facebox service status
    Status,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Returning the error makes the process exit non-zero.
    run(cli).inspect_err(|err| tracing::error!("{err:#}"))
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.global.config.as_deref())?;
    if let Some(url) = cli.global.facebox_url {
        config.facebox_url = url;
    }

    match cli.command {
        Commands::Train {
            in_dir,
            out_dir,
            delay_ms,
        } => {
            let client = connect(&config)?;
            let delay = delay_ms.map_or_else(|| config.train_delay(), Duration::from_millis);
            let opts = TrainOptions::new(in_dir, out_dir).with_delay(delay);
            let state_path = facetag_core::train(&client, &opts).context("training failed")?;
            tracing::info!(path = %state_path.display(), "training complete");
        }
        Commands::Identify {
            in_model_dir,
            in_image_dir,
            out_dir,
        } => {
            let client = connect(&config)?;
            let opts = IdentifyOptions::new(in_model_dir, in_image_dir, out_dir);
            let written =
                facetag_core::identify(&client, &opts).context("identification failed")?;
            tracing::info!(results = written.len(), "identification complete");
        }
        Commands::Tag {
            faces_dir,
            images_dir,
            tags_dir,
            out_dir,
            quality,
        } => {
            let quality = quality.map_or_else(|| config.jpeg_quality(), |q| q.clamp(1, 100));
            let opts = TagOptions::new(faces_dir, images_dir, tags_dir, out_dir).with_quality(quality);
            let written = facetag_core::tag(&opts).context("tagging failed")?;
            tracing::info!(images = written.len(), "tagging complete");
        }
        Commands::Status => {
            let client = connect(&config)?;
            let info = client
                .info()
                .with_context(|| format!("querying {}", client.base_url()))?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}

/// Open the one service handle used for the whole run.
fn connect(config: &Config) -> Result<FaceboxClient> {
    let client = FaceboxClient::with_timeout(&config.facebox_url, config.request_timeout())
        .with_context(|| format!("creating facebox client for {}", config.facebox_url))?;
    tracing::info!(url = client.base_url(), "using facebox");
    Ok(client)
}
