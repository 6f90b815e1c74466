use std::error::Error;
use tracing_subscriber::EnvFilter;
use tsubu::Options;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // optional path to a JSON config
    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    tsubu::app::run(options)?;
    Ok(())
}
