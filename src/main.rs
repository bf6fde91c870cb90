use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod output;

use cli::Args;
use solar_tracker_view::{generate_sun_path, summarize, Tracker, TrackerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let base = match &args.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };
    let config = args.apply(base);
    debug!(?config, "effective configuration");

    let inputs = config.to_inputs()?;
    let tracker = Tracker::new(inputs);

    let day = if args.path {
        let path = generate_sun_path(&inputs.observation, &config.sun_path_config())?;
        Some(summarize(&path))
    } else {
        None
    };

    if args.json {
        println!("{}", output::render_json(tracker.frame(), day.as_ref())?);
    } else {
        print!("{}", output::render_text(tracker.frame(), day.as_ref())?);
    }
    Ok(())
}
