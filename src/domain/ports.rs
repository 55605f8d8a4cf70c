use crate::domain::model::{Reconciliation, ReportFormat, SourceRecords};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    /// 逐行讀取整個檔案；檔案在回傳前即關閉
    fn read_lines(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = std::io::Result<Vec<String>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = std::io::Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn cloud_file_path(&self) -> &str;
    fn mainframe_file_path(&self) -> &str;
    fn cloud_filter_pattern(&self) -> &str;
    fn cloud_split_pattern(&self) -> &str;
    fn mainframe_filter_column(&self) -> &str;
    fn report_output_path(&self) -> &str;
    fn report_format(&self) -> ReportFormat;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceRecords>;
    async fn transform(&self, records: &SourceRecords) -> Result<Reconciliation>;
    async fn load(&self, reconciliation: &Reconciliation) -> Result<String>;
}
