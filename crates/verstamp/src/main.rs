use std::process;

use tracing_subscriber::EnvFilter;
use verstamp_cli::UserCancelled;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("VERSTAMP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = verstamp_cli::main(std::env::args().collect::<Vec<String>>().as_slice()).await
    {
        if e.downcast_ref::<UserCancelled>().is_none() {
            eprintln!("Error: {e:#}");
        }
        process::exit(1);
    }
}
