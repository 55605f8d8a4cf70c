pub mod etl;
pub mod extract;
pub mod pipeline;
pub mod reconcile;
pub mod report;

pub use crate::domain::model::{
    Classification, Identifier, ReconSummary, Reconciliation, RecordSet, ReportFormat,
    SourceRecords,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
