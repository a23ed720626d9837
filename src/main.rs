use clap::Parser;
use tracing_subscriber::EnvFilter;

use primer_scout::cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("primer_scout=debug,info")
    } else {
        EnvFilter::new("primer_scout=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    cli.run()
}
