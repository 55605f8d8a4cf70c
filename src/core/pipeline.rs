use crate::core::extract::{CloudExtractor, IdentifierExtractor, MainframeExtractor};
use crate::core::reconcile::reconcile;
use crate::core::report::ReportWriter;
use crate::core::{ConfigProvider, Pipeline, Reconciliation, SourceRecords, Storage};
use crate::domain::model::RecordSet;
use crate::utils::error::{ReconError, Result};

pub struct LogReconPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    cloud: CloudExtractor,
    mainframe: MainframeExtractor,
    report: ReportWriter,
}

impl<S: Storage, C: ConfigProvider> LogReconPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let cloud = CloudExtractor::from_config(&config)?;
        let mainframe = MainframeExtractor::from_config(&config);
        let report = ReportWriter::new(config.report_format());

        Ok(Self {
            storage,
            config,
            cloud,
            mainframe,
            report,
        })
    }

    pub fn with_report_writer(mut self, report: ReportWriter) -> Self {
        self.report = report;
        self
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    async fn read_source<E: IdentifierExtractor + Sync>(
        &self,
        extractor: &E,
        path: &str,
    ) -> Result<RecordSet> {
        tracing::debug!("Reading {} log from: {}", extractor.source_name(), path);

        let lines = self
            .storage
            .read_lines(path)
            .await
            .map_err(|e| ReconError::SourceReadError {
                source_name: extractor.source_name().to_string(),
                path: path.to_string(),
                source: e,
            })?;

        Ok(extractor.extract(&lines))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for LogReconPipeline<S, C> {
    async fn extract(&self) -> Result<SourceRecords> {
        let cloud = self
            .read_source(&self.cloud, self.config.cloud_file_path())
            .await?;
        let mainframe = self
            .read_source(&self.mainframe, self.config.mainframe_file_path())
            .await?;

        Ok(SourceRecords { cloud, mainframe })
    }

    async fn transform(&self, records: &SourceRecords) -> Result<Reconciliation> {
        Ok(reconcile(&records.mainframe, &records.cloud))
    }

    async fn load(&self, reconciliation: &Reconciliation) -> Result<String> {
        let output_path = self.config.report_output_path();

        let data = self
            .report
            .render(reconciliation)
            .map_err(|e| ReconError::report_write(output_path, e))?;

        tracing::debug!(
            "Writing {} report ({} bytes) to storage",
            self.report.format(),
            data.len()
        );
        self.storage
            .write_file(output_path, &data)
            .await
            .map_err(|e| ReconError::report_write(output_path, e))?;

        Ok(output_path.to_string())
    }
}
