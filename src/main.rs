use clap::Parser;
use closure_minify::core::ConfigProvider;
use closure_minify::utils::error::Result;
use closure_minify::utils::logger;
use closure_minify::utils::validation::Validate;
use closure_minify::{
    CliConfig, LocalStorage, MinifyEngine, MinifyPipeline, MinifyReport, TomlConfig,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting closure-minify");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let monitor_enabled = cli.monitor;
    let result = match cli.config.clone() {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(config) => {
                let monitor = monitor_enabled || config.monitoring_enabled();
                run_pipeline(config, monitor).await
            }
            Err(e) => Err(e),
        },
        None => run_pipeline(cli, monitor_enabled).await,
    };

    match result {
        Ok(report) => {
            tracing::info!("✅ Minification completed successfully!");
            tracing::info!("📁 Output saved to: {}", report.output_path);
        }
        Err(e) => {
            tracing::error!("❌ Minification failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

async fn run_pipeline<C>(config: C, monitor_enabled: bool) -> Result<MinifyReport>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(".".to_string());
    let pipeline = MinifyPipeline::new(storage, config);
    let engine = MinifyEngine::new_with_monitoring(pipeline, monitor_enabled);

    engine.run().await
}
