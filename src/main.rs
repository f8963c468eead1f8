use anyhow::Result;
use clap::Parser;
use std::io;
use std::process;
use std::time::Instant;
use tracing::{error, info};

use wikidata_stats::utils::{setup_logging, validate_args};
use wikidata_stats::{
    classify, fetch_contributions, report, Args, Prompter, Report, ReqwestClient,
};

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = validate_args(&args) {
        error!(action = "validate", component = "args", error = %e, "Invalid arguments");
        eprintln!("Error: {e}");
        process::exit(1);
    }

    println!("--- Wikidata Contribution Statistics Reporter ---");

    let request = {
        let stdin = io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), io::stdout());
        match prompter.collect() {
            Ok(request) => request,
            Err(e) => {
                error!(action = "collect", component = "input", error = %e, "Input aborted");
                println!("{e}");
                process::exit(1);
            }
        }
    };

    let total_start_time = Instant::now();
    println!("\nFetching contributions for '{}'...", request.username);

    let fetched = ReqwestClient::new().and_then(|client| {
        fetch_contributions(&client, &args.endpoint, &request.username, &request.range)
    });
    let contributions = match fetched {
        Ok(contributions) => contributions,
        Err(e) => {
            error!(action = "fetch", component = "contribution_fetch", error = %e, "Fetch failed");
            println!("{e}");
            println!("\nCould not retrieve contributions. Exiting.");
            return Ok(());
        }
    };
    println!("Total contributions found in period: {}", contributions.len());

    println!("\nAnalyzing contributions...");
    let result = classify(&contributions);
    println!("  Pages created: {}", result.created_count());
    println!("  Pages edited (excluding created): {}", result.edited_count());

    let summary = Report::new(&request.username, &request.range, &result);
    report::print_and_save(&summary, &args.output_dir);

    info!(
        action = "complete",
        component = "run",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Run completed"
    );
    Ok(())
}
