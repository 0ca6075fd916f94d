// Merge the incremental exports of ImportNewData/ into the master workbook of the current directory
//
// reset; cargo run -- --dry-run
// reset; cargo run -- --base-dir ./data --serial-column "Serial_Number"

use clap::Parser;
use xlsx_merger::cli::Args;
use xlsx_merger::utils::{build_config, print_summary};

fn main() -> Result<(), anyhow::Error> {
    let arguments = Args::parse();
    let config = build_config(&arguments)?;

    let outcome = if arguments.dry_run {
        merger_lib::preview(&config)
    } else {
        merger_lib::run(&config)
    };

    match outcome {
        Ok(report) => {
            print_summary(&report);
            if arguments.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            Ok(())
        }
        Err(e) => {
            // Already written to the error log by the pipeline
            eprintln!("❌ Merge failed with error: {e}");
            eprintln!("❌ Check {} for details.", config.error_log_path().display());
            std::process::exit(1);
        }
    }
}
