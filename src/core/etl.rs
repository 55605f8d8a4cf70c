use crate::core::{Pipeline, ReconSummary};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ReconEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ReconEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<ReconSummary> {
        tracing::info!("Starting log reconciliation...");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} cloud and {} mainframe identifiers",
            records.cloud.len(),
            records.mainframe.len()
        );
        self.monitor.log_stats("Extract");

        // Transform
        let reconciliation = self.pipeline.transform(&records).await?;
        tracing::info!(
            "Reconciled: {} unmatched, {} matched, {} unprocessed",
            reconciliation.unmatched.len(),
            reconciliation.matched.len(),
            reconciliation.unprocessed.len()
        );
        self.monitor.log_stats("Reconcile");

        // Load
        let output_path = self.pipeline.load(&reconciliation).await?;
        tracing::info!("Report saved to: {}", output_path);
        self.monitor.log_stats("Report");
        self.monitor.log_final_stats();

        Ok(ReconSummary::new(&records, &reconciliation, output_path))
    }
}
