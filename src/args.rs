use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str = "https://www.wikidata.org/w/api.php";

#[derive(Parser, Debug)]
#[command(
    name = "wikidata-stats",
    about = "Count the Wikidata items a user created and edited over a month or date range",
    version,
    long_about = None
)]
pub struct Args {
    /// MediaWiki API endpoint to query
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Directory the report file is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
