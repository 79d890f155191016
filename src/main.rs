use clap::{Arg, Command};
use env_logger::Env;
use std::path::PathBuf;
use std::process;

use skufetch::select::StdinConfirm;
use skufetch::{ConfigError, Settings, driver};

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let matches = Command::new("skufetch")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Search product images by name and download the accepted result under the SKU filename")
        .arg(
            Arg::new("input")
                .long("input")
                .value_name("PATH")
                .help("Path to the product spreadsheet (xlsx or csv)"),
        )
        .arg(
            Arg::new("output-dir")
                .long("output-dir")
                .value_name("PATH")
                .help("Directory to save downloaded images"),
        )
        .arg(
            Arg::new("max-results")
                .long("max-results")
                .value_name("COUNT")
                .value_parser(clap::value_parser!(usize))
                .help("Number of top image results to review per product"),
        )
        .get_matches();

    let mut settings = match Settings::new() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };
    if let Some(input) = matches.get_one::<String>("input") {
        settings.input = PathBuf::from(input);
    }
    if let Some(output_dir) = matches.get_one::<String>("output-dir") {
        settings.output_dir = PathBuf::from(output_dir);
    }
    if let Some(max_results) = matches.get_one::<usize>("max-results") {
        settings.max_results = *max_results;
    }

    let mut confirm = StdinConfirm;
    match driver::run(&settings, &mut confirm) {
        Ok(()) => {}
        Err(ConfigError::ColumnsUnresolved(headers)) => {
            eprintln!("Could not find required columns. Ensure the spreadsheet has SKU and name columns.");
            eprintln!("Headers found: {:?}", headers);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
