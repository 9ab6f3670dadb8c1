// keytrack — replays a captured key event stream and reports per-key state.

mod replay;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use keytrack_input::InputConfig;
use keytrack_input::config::CONFIG_FILE;
use log::info;

#[derive(Parser, Debug)]
#[command(name = "keytrack", about = "Replay key events and report per-key state")]
struct Args {
    /// JSON-lines capture, one `{code, type, timestamp, altKey?, ctrlKey?, shiftKey?}` per line.
    capture: PathBuf,

    /// Path to input config JSON file.
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Reject unrecognized and out-of-order events.
    #[arg(long, env = "KEYTRACK_STRICT")]
    strict: bool,

    /// Evaluate queries at this time (microseconds) instead of the last event time.
    #[arg(long)]
    at: Option<i64>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = InputConfig::load_from(&args.config)?;
    if args.strict {
        config.strict = true;
    }
    info!(
        "Loaded config from {} (strict={})",
        args.config.display(),
        config.strict
    );

    let events = replay::read_events(&args.capture)?;
    let replay = replay::replay(&events, config);
    if let Some(at) = args.at {
        replay.clock.set_time(at);
    }

    if args.json {
        println!("{}", replay::render_json(&replay)?);
    } else {
        print!("{}", replay::render_report(&replay));
    }
    Ok(())
}
