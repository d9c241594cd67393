//! Hand gesture media controller driven by a landmark bridge.

use anyhow::{Context, Result};
use clap::Parser;
use hand_media_control::{
    app::{HandControlApp, RunSummary},
    capture::{CaptureSource, DetectionRecord, JsonLinesCapture},
    clock::{Clock, MonotonicClock},
    config::{Config, EXAMPLE_CONFIG},
    dispatch::create_dispatcher,
    landmarks::BridgeHandModel,
    pipeline::GesturePipeline,
    render::create_renderer,
};
use log::{info, warn};
use signal_hook::consts::{SIGINT, SIGTERM};
use std::sync::{atomic::AtomicBool, Arc};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// File of JSON detection records to replay ("-" for stdin)
    #[arg(short, long)]
    input: Option<String>,

    /// Dispatch backend (log, x11, shell); overrides the config file
    #[arg(long)]
    dispatch: Option<String>,

    /// Open the preview window
    #[arg(short, long)]
    gui: bool,

    /// Mirror landmark x coordinates
    #[arg(long)]
    flip: bool,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Print an example configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,

    /// Landmark bridge command to spawn, e.g. `--bridge python3 hand_bridge.py`
    #[arg(long, num_args = 1.., allow_hyphen_values = true, conflicts_with = "input")]
    bridge: Vec<String>,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Hand Gesture Media Controller ({})", env!("BUILD_TARGET"));

    let config = load_config(&args)?;

    // Ctrl-C and SIGTERM end the loop after the current frame; a second one exits at once
    let quit = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register_conditional_shutdown(signal, 1, Arc::clone(&quit))
            .and_then(|_| signal_hook::flag::register(signal, Arc::clone(&quit)))
            .context("Failed to install signal handler")?;
    }

    let summary = if !args.bridge.is_empty() {
        run(JsonLinesCapture::spawn(&args.bridge)?, &config, &args, quit)?
    } else {
        match args.input.as_deref() {
            None | Some("-") => run(JsonLinesCapture::stdin(), &config, &args, quit)?,
            Some(path) => run(JsonLinesCapture::open(path)?, &config, &args, quit)?,
        }
    };

    info!("Done: {}", summary);
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Command line overrides
    if let Some(backend) = &args.dispatch {
        config.dispatch.backend.clone_from(backend);
    }
    if args.gui {
        config.display.gui = true;
    }
    if args.flip {
        config.source.flip_x = true;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run<S>(source: S, config: &Config, args: &Args, quit: Arc<AtomicBool>) -> Result<RunSummary>
where
    S: CaptureSource<Frame = DetectionRecord>,
{
    let clock = MonotonicClock::new();
    let pipeline = GesturePipeline::from_config(config, clock.now())?;
    let model = BridgeHandModel::from_config(&config.source);
    let dispatcher = create_dispatcher(&config.dispatch).context("Failed to start dispatcher")?;
    let renderer = create_renderer(&config.display)?;

    let mut app = HandControlApp::new(source, model, pipeline, dispatcher, clock)
        .with_renderer(renderer)
        .with_max_frames(args.max_frames)
        .with_quit_flag(quit);

    Ok(app.run()?)
}
