use crate::core::{MinifyReport, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct MinifyEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> MinifyEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(false),
        }
    }

    pub fn new_with_monitoring(pipeline: P, enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(enabled),
        }
    }

    /// Runs the three stages in order, then prints the size report.
    ///
    /// Stdout carries exactly the two report lines; everything else is
    /// emitted through tracing. The output file is only touched after the
    /// full response body has arrived.
    pub async fn run(&self) -> Result<MinifyReport> {
        tracing::info!("Reading source...");
        let source = self.pipeline.extract().await?;
        tracing::info!("Loaded {} ({} bytes)", source.path, source.byte_len());
        self.monitor.log_stats("extract");

        tracing::info!("Requesting minification...");
        let result = self.pipeline.transform(source).await?;
        tracing::info!("Received {} bytes", result.minified_len());
        self.monitor.log_stats("transform");

        let original_len = result.original_len;
        let minified_len = result.minified_len();
        let compilation_level = result.compilation_level;

        tracing::info!("Writing output...");
        let output_path = self.pipeline.load(result).await?;
        self.monitor.log_stats("load");

        println!("Original:{}", original_len);
        println!("Minified ({}):{}", compilation_level, minified_len);

        self.monitor.log_final_stats();
        Ok(MinifyReport {
            original_len,
            minified_len,
            compilation_level,
            output_path,
        })
    }
}
