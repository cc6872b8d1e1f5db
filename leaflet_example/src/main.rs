use clap::Parser;

use leaflet_example::{bootstrap, bootstrap_with, read_config};

#[derive(Parser)]
#[command(name = "leaflet_example", version, about = "Builds the demo map page")]
struct Cli {
    /// JSON file overriding the page settings.
    #[arg(long)]
    config: Option<String>,
    /// Print the object graph instead of the summary.
    #[arg(long)]
    dump: bool,
    /// Raise log verbosity; repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let built = match &cli.config {
        Some(path) => match read_config(path) {
            Ok(config) => bootstrap_with(&config),
            Err(e) => {
                eprintln!("Error reading {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => bootstrap(),
    };
    let example = match built {
        Ok(example) => example,
        Err(e) => {
            eprintln!("Error building the map: {}", e);
            std::process::exit(1);
        }
    };

    if cli.dump {
        match serde_json::to_string_pretty(&example.model.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error writing snapshot: {}", e),
        }
        return;
    }
    match example.summary() {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            eprintln!("Error reading the map: {}", e);
            std::process::exit(1);
        }
    }
}
