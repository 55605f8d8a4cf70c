use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 跨系統比對用的交易識別碼
pub type Identifier = String;

/// 從單一來源擷取出的識別碼，保留來源順序
pub type RecordSet = Vec<Identifier>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Unmatched,
    Matched,
    Unprocessed,
}

impl Classification {
    pub const ALL: [Classification; 3] = [
        Classification::Unmatched,
        Classification::Matched,
        Classification::Unprocessed,
    ];

    /// 報表欄位標題
    pub fn header(&self) -> &'static str {
        match self {
            Classification::Unmatched => "Unmatched Items",
            Classification::Matched => "Matched Items",
            Classification::Unprocessed => "Unprocessed Items",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// extract 階段的輸出：兩個來源各自的識別碼
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRecords {
    pub cloud: RecordSet,
    pub mainframe: RecordSet,
}

/// transform 階段的輸出：三個分類
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub unmatched: RecordSet,
    pub matched: RecordSet,
    pub unprocessed: RecordSet,
}

impl Reconciliation {
    pub fn bucket(&self, classification: Classification) -> &[Identifier] {
        match classification {
            Classification::Unmatched => &self.unmatched,
            Classification::Matched => &self.matched,
            Classification::Unprocessed => &self.unprocessed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub cloud_items: usize,
    pub mainframe_items: usize,
    pub unmatched: usize,
    pub matched: usize,
    pub remaining: usize,
    pub output_path: String,
    pub completed_at: DateTime<Utc>,
}

impl ReconSummary {
    pub fn new(records: &SourceRecords, reconciliation: &Reconciliation, output_path: String) -> Self {
        Self {
            cloud_items: records.cloud.len(),
            mainframe_items: records.mainframe.len(),
            unmatched: reconciliation.unmatched.len(),
            matched: reconciliation.matched.len(),
            remaining: reconciliation.unprocessed.len(),
            output_path,
            completed_at: Utc::now(),
        }
    }
}

impl fmt::Display for ReconSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total cloud items: {}, Total mainframe items: {}, Unmatched: {}, Matched: {}, Remaining: {}",
            self.cloud_items, self.mainframe_items, self.unmatched, self.matched, self.remaining
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display_format() {
        let records = SourceRecords {
            cloud: vec!["571=A".into(), "571=B".into()],
            mainframe: vec!["571=A".into(), "571=C".into(), "571=D".into()],
        };
        let reconciliation = Reconciliation {
            unmatched: vec!["571=C".into(), "571=D".into()],
            matched: vec!["571=A".into()],
            unprocessed: vec!["571=B".into()],
        };

        let summary = ReconSummary::new(&records, &reconciliation, "out.xlsx".to_string());

        assert_eq!(
            summary.to_string(),
            "Total cloud items: 2, Total mainframe items: 3, Unmatched: 2, Matched: 1, Remaining: 1"
        );
    }

    #[test]
    fn test_classification_headers() {
        let headers: Vec<&str> = Classification::ALL.iter().map(|c| c.header()).collect();
        assert_eq!(
            headers,
            vec!["Unmatched Items", "Matched Items", "Unprocessed Items"]
        );
    }
}
