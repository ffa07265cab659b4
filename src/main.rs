use clap::{Parser, Subcommand};
use image::ImageReader;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shapesketch::drawing::CANVAS_SIZE;
use shapesketch::{
    AppConfig, AppContext, DrawingBitmap, LoadedModel, ModelChoice, ShapeClass, SubmitOutcome,
    SubmitRequest,
};

#[derive(Parser)]
#[command(name = "shapesketch")]
#[command(about = "Draw a flat shape and let a pretrained classifier name it")]
struct Cli {
    /// Configuration file (shapesketch.toml is used when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the drawing window (default)
    Gui,

    /// Classify an image file without opening a window
    Classify {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        /// Model to use: adam, sgd, rmsprop or the full name
        #[arg(short, long)]
        model: ModelChoice,

        /// Shape the image is supposed to show; used for the storage path
        #[arg(short, long, default_value = "lingkaran")]
        target: ShapeClass,

        /// Skip uploading the image
        #[arg(long)]
        no_upload: bool,

        /// Save debug outputs to directory (must be empty)
        #[arg(long, value_name = "DIR")]
        debug_out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = AppConfig::load(args.config.as_deref())?;
    init_tracing(&config.log_level, args.verbose);

    match args.command.unwrap_or(Command::Gui) {
        Command::Gui => run_gui(config),
        Command::Classify {
            image_path,
            model,
            target,
            no_upload,
            debug_out,
        } => {
            // The window owns its own runtime, so only the headless path builds one
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(classify(config, image_path, model, target, !no_upload, debug_out))
        }
    }
}

fn init_tracing(level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shapesketch={},rten=warn,wgpu=warn", level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(feature = "gui")]
fn run_gui(config: AppConfig) -> anyhow::Result<()> {
    let context = AppContext::new(config, true, None)?;
    shapesketch::gui::run(context)?;
    Ok(())
}

#[cfg(not(feature = "gui"))]
fn run_gui(_config: AppConfig) -> anyhow::Result<()> {
    anyhow::bail!("Built without the `gui` feature; use `shapesketch classify` instead")
}

async fn classify(
    config: AppConfig,
    image_path: PathBuf,
    model: ModelChoice,
    target: ShapeClass,
    upload: bool,
    debug_out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let context = AppContext::new(config, upload, debug_out)?;

    info!("Loading image: {:?}", image_path);
    let img = ImageReader::open(&image_path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    info!("Image loaded: {}x{}", img.width(), img.height());

    let bitmap = DrawingBitmap::from_image_resized(&img, CANVAS_SIZE);

    let selector = context.models.clone();
    let handle = tokio::task::spawn_blocking(move || selector.load(model)).await??;

    let request = SubmitRequest {
        model: Some(LoadedModel {
            choice: model,
            handle,
        }),
        target,
        bitmap,
    };

    match context.pipeline.submit(request).await? {
        SubmitOutcome::Rejected(rejection) => println!("{}", rejection),
        SubmitOutcome::Completed(submission) => {
            println!("\n=== Classification Result ===");
            println!("Model used:      {}", submission.model);
            println!("Selected shape:  {}", submission.target);
            println!(
                "Classified as:   {} (score {:.3})",
                submission.prediction.class,
                submission.prediction.confidence()
            );
            if !submission.matches_target() {
                println!("The drawing should belong to the {} category.", submission.target);
            }
            if let Some(record) = &submission.upload {
                println!("Saved as:        {}", record.file_name);
                println!("URL:             {}", record.public_url);
            }
        }
    }

    Ok(())
}
