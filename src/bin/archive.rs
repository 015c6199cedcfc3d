use clap::Parser;
use std::path::PathBuf;
use vegfi::adapters::archive::add_to_archive;
use vegfi::adapters::http::{HttpFeedSource, DEFAULT_ENDPOINT};
use vegfi::utils::logger;
use vegfi::utils::validation::validate_url;

#[derive(Parser)]
#[command(name = "vegfi-archive")]
#[command(about = "Append the raw menu feed to an archive file when it has changed")]
struct Args {
    /// The archive file
    #[arg(value_name = "FILE")]
    target: PathBuf,

    /// Menu feed URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    validate_url("endpoint", &args.endpoint)?;

    let data = HttpFeedSource::new(args.endpoint.as_str()).fetch_raw().await?;
    if add_to_archive(&args.target, &data)? {
        tracing::info!("Archived {} bytes into {}", data.len(), args.target.display());
        println!("Archive updated");
    } else {
        println!("No new data");
    }
    Ok(())
}
