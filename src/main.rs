use buffet_planner::adapters::{LocalStorage, ManualDetector, SampleDetector};
use buffet_planner::config::CliConfig;
use buffet_planner::core::engine::StrategyEngine;
use buffet_planner::core::pipeline::PlanRequest;
use buffet_planner::domain::model::StrategyResponse;
use buffet_planner::domain::ports::Storage;
use buffet_planner::utils::logger;
use buffet_planner::utils::validation::Validate;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    logger::init_cli_logger(cli.verbose);

    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = settings.validate() {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    let request = PlanRequest::from_settings(&settings);

    let response: StrategyResponse = match &settings.input {
        Some(path) => {
            let detector =
                ManualDetector::new(LocalStorage::new(String::new()), path.clone());
            StrategyEngine::new(detector).run(&request).await?
        }
        None => {
            tracing::info!("No input file given, planning the demo buffet");
            StrategyEngine::new(SampleDetector).run(&request).await?
        }
    };

    let json = serde_json::to_string_pretty(&response)?;
    match &settings.output {
        Some(path) => {
            LocalStorage::new(String::new())
                .write_file(path, json.as_bytes())
                .await?;
            tracing::info!("Strategy written to {}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}
