use clap::Parser;
use planfeed::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic with signal handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        // Create cancellation token for coordinating graceful shutdown
        let cancellation_token = CancellationToken::new();

        // Set up graceful shutdown handling
        let shutdown_signal = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install CTRL+C signal handler");

            // Cancel all operations when Ctrl+C is received
            cancellation_token.cancel();
        };

        // Run the main command with cancellation support
        tokio::select! {
            result = commands::run(args, cancellation_token.clone()) => {
                result
            }
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down gracefully...");
                Err(planfeed::Error::processing_interrupted(
                    "Refresh loop interrupted by user".to_string()
                ))
            }
        }
    });

    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Planfeed - Live Floor-Plan Inventory Engine");
    println!("===========================================");
    println!();
    println!("Ingest a published spreadsheet CSV export of parking and storage units");
    println!("into a normalized unit registry for a live floor-plan display.");
    println!();
    println!("USAGE:");
    println!("    planfeed <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    watch       Poll the published feed and keep the registry fresh (main command)");
    println!("    inspect     Fetch or read the feed once and dump the parsed registry");
    println!("    details     Resolve one unit's relationships and aggregates");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Poll a published Google Sheets CSV export:");
    println!("    planfeed watch --url 'https://docs.google.com/spreadsheets/d/e/<key>/pub?output=csv'");
    println!();
    println!("    # Use the header-global feed shape with a custom cadence:");
    println!("    planfeed watch --url <URL> --shape header-global --interval-ms 10000");
    println!();
    println!("    # Dump a local export and resolve one unit:");
    println!("    planfeed inspect ./feed.csv");
    println!("    planfeed details ./feed.csv P001");
    println!();
    println!("For detailed help on any command, use:");
    println!("    planfeed <COMMAND> --help");
}
