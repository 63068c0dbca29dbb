mod commands;

use commands::command_argument_builder;
use sitescribe::handlers;
use tracing_subscriber::EnvFilter;

fn main() {
    let cmd = command_argument_builder();
    let matches = cmd.get_matches();

    init_tracing(matches.get_count("verbose"));

    if let Err(e) = handlers::handle_crawl(&matches) {
        eprintln!("✗ Crawl failed: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}
