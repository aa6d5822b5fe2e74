use clap::Parser;
use telco_churn::app::pages::{performance, prediction, visualization};
use telco_churn::utils::{logger, validation::Validate};
use telco_churn::{CliConfig, Command, GbdtChurnModel, LocalStorage, PredictMode};

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting telco-churn");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    match run(&config) {
        Ok(report) => println!("{}", report),
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn run(config: &CliConfig) -> telco_churn::Result<String> {
    let storage = LocalStorage::new(".".to_string());

    match &config.command {
        Command::Visualize => visualization::run(&storage, &config.dataset_path),
        Command::Performance => performance::run(&storage, &config.metrics_path),
        Command::Predict { mode } => {
            // Loaded once per invocation; the page holds the model
            // immutably for its whole lifetime.
            let model = GbdtChurnModel::load(&config.model_path)?;
            let output_storage = LocalStorage::new(config.output_path.clone());
            let mut page = prediction::PredictionPage::new(model, output_storage);

            match mode {
                PredictMode::Single(args) => page.single(args.clone().into_record()),
                PredictMode::Batch { input, output } => page.file_batch(storage, input, output),
                PredictMode::Manual { count, output } => {
                    let stdin = std::io::stdin();
                    page.manual(*count, stdin.lock(), output)
                }
            }
        }
    }
}
