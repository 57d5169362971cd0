//! m3u-munge - IPTV M3U playlist cleaner
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::error::Error;
use std::process;

use m3u_munge::cli::Args;
use m3u_munge::processor::{MungeConfig, Processor};
use m3u_munge::progress::{print_banner, print_error, print_header, print_success};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "warn");
    }
    env_logger::init();

    process::exit(run(args));
}

fn run(args: Args) -> i32 {
    if !args.quiet {
        print_banner();
    }

    let config = MungeConfig::from_args(&args);
    let mut processor = Processor::new(config);
    let mut exit_code = 0;

    // each input file is processed independently; a failure on one does not
    // stop the rest
    for input in &args.files {
        if !args.quiet {
            print_header(&format!("Processing {}", input.display()));
        }

        match processor.process(input) {
            Ok(report) => {
                if !args.quiet {
                    print_success(&format!(
                        "{} channels written to {}",
                        report.exported,
                        report.output_path.display()
                    ));
                }
            }
            Err(e) => {
                print_error(&format!("{}", e));

                // Print chain of errors
                let mut source = e.source();
                while let Some(err) = source {
                    print_error(&format!("  Caused by: {}", err));
                    source = err.source();
                }

                if exit_code == 0 {
                    exit_code = e.exit_code();
                }
            }
        }
    }

    if !args.quiet {
        processor.stats.print_summary();
    }

    exit_code
}
