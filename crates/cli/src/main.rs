use std::process;

use clap::Parser;

use corrugate_calculator::CalculatorConfig;
use corrugate_cli::{Cli, Commands, run_calculate, run_quote};

fn run(cli: Cli) -> anyhow::Result<String> {
    let config = cli.config.apply(CalculatorConfig::default())?;

    match cli.command {
        Commands::Calculate { box_args, formulas } => run_calculate(&config, &box_args, formulas),
        Commands::Quote { box_args, order } => {
            let summary = run_quote(&config, &box_args, &order, chrono::Utc::now())?;
            Ok(serde_json::to_string_pretty(&summary)?)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    corrugate_observability::init();

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            process::exit(1);
        }
    }
}
