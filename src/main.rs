use clap::Parser;
use status_extractor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = commands::run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Status Extractor - Call Status Counts from Spreadsheet Paste Data");
    println!("==================================================================");
    println!();
    println!("Reads tab-separated rows copied from a delivery sheet and reports");
    println!("how many calls ended in each whitelisted status.");
    println!();
    println!("USAGE:");
    println!("    status-extractor <COMMAND> <INPUT> --statuses <FILE> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Per-status counts and the suggested arrival date");
    println!("    preview     Records grouped by status");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Count statuses in a saved paste:");
    println!("    status-extractor process paste.txt --statuses statuses.json");
    println!();
    println!("    # Preview clipboard contents as JSON:");
    println!("    pbpaste | status-extractor preview - -s statuses.json --format json");
    println!();
    println!("    # Only calls made on one day:");
    println!("    status-extractor process sheets/ -s statuses.toml --called-date 27/01/2026");
    println!();
    println!("For detailed help on any command, use:");
    println!("    status-extractor <COMMAND> --help");
}
