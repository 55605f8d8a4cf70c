use crate::core::ConfigProvider;
use crate::domain::model::{Identifier, RecordSet};
use crate::utils::error::{ReconError, Result};
use regex::Regex;

pub const CLOUD_IDENTIFIER_TAG: &str = "571=";
pub const CLOUD_DIRECTION_MARKER: &str = "outgoing";
pub const MAINFRAME_DELIMITER: char = '|';
/// 識別碼位於第 12 欄 (index 11)
pub const MAINFRAME_IDENTIFIER_INDEX: usize = 11;

pub trait IdentifierExtractor {
    /// 來源名稱，用於日誌與錯誤訊息
    fn source_name(&self) -> &'static str;

    /// 不符合格式的行回傳 None，不視為錯誤
    fn extract_line(&self, line: &str) -> Option<Identifier>;

    fn extract<I, S>(&self, lines: I) -> RecordSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut total = 0usize;
        let identifiers: RecordSet = lines
            .into_iter()
            .inspect(|_| total += 1)
            .filter_map(|line| self.extract_line(line.as_ref()))
            .collect();

        tracing::debug!(
            "{}: kept {} of {} lines ({} skipped)",
            self.source_name(),
            identifiers.len(),
            total,
            total - identifiers.len()
        );

        identifiers
    }
}

/// 切割後去掉尾端的空欄位 (`a|b||` 視為兩欄)
pub(crate) fn trim_trailing_empty<'a>(mut fields: Vec<&'a str>) -> Vec<&'a str> {
    while fields.len() > 1 && fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    if fields.len() == 1 && fields[0].is_empty() {
        fields.clear();
    }
    fields
}

#[derive(Debug, Clone)]
pub struct CloudExtractor {
    filter_pattern: String,
    split_pattern: Regex,
}

impl CloudExtractor {
    pub fn new(filter_pattern: impl Into<String>, split_pattern: &str) -> Result<Self> {
        let split_pattern = Regex::new(split_pattern).map_err(|e| ReconError::PatternError {
            pattern: split_pattern.to_string(),
            source: e,
        })?;

        Ok(Self {
            filter_pattern: filter_pattern.into(),
            split_pattern,
        })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(config.cloud_filter_pattern(), config.cloud_split_pattern())
    }

    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let fields: Vec<&str> = self.split_pattern.split(line).collect();
        // 沒有任何切割點時保留整行
        if fields.len() == 1 {
            return fields;
        }
        trim_trailing_empty(fields)
    }
}

impl IdentifierExtractor for CloudExtractor {
    fn source_name(&self) -> &'static str {
        "cloud"
    }

    fn extract_line(&self, line: &str) -> Option<Identifier> {
        if !line.contains(self.filter_pattern.as_str()) || !line.contains(CLOUD_DIRECTION_MARKER) {
            return None;
        }

        let fields = self.split(line);
        let field = *fields.get(1)?;

        // 取到 filter pattern 第一次出現前；沒出現則取整段
        let token = match field.find(self.filter_pattern.as_str()) {
            Some(end) => &field[..end],
            None => field,
        };

        Some(format!("{}{}", CLOUD_IDENTIFIER_TAG, token))
    }
}

#[derive(Debug, Clone)]
pub struct MainframeExtractor {
    filter_prefix: String,
}

impl MainframeExtractor {
    pub fn new(filter_prefix: impl Into<String>) -> Self {
        Self {
            filter_prefix: filter_prefix.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.mainframe_filter_column())
    }
}

impl IdentifierExtractor for MainframeExtractor {
    fn source_name(&self) -> &'static str {
        "mainframe"
    }

    fn extract_line(&self, line: &str) -> Option<Identifier> {
        if !line.contains(MAINFRAME_DELIMITER) {
            return None;
        }

        let fields = trim_trailing_empty(line.split(MAINFRAME_DELIMITER).collect());
        let field = *fields.get(MAINFRAME_IDENTIFIER_INDEX)?;

        field
            .starts_with(self.filter_prefix.as_str())
            .then(|| field.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud() -> CloudExtractor {
        CloudExtractor::new("FILTER", r"\|").unwrap()
    }

    #[test]
    fn test_cloud_extracts_tagged_identifier() {
        let id = cloud().extract_line("FILTER outgoing x|AFILTERtail");
        assert_eq!(id.as_deref(), Some("571=A"));
    }

    #[test]
    fn test_cloud_second_field_led_by_filter() {
        // 第二欄以 filter 開頭，filter 前沒有內容
        let id = cloud().extract_line("2024-01-01 FILTER outgoing A|FILTERtail");
        assert_eq!(id.as_deref(), Some("571="));
    }

    #[test]
    fn test_cloud_filter_bounds_token_literally() {
        let extractor = CloudExtractor::new("8=FIX.4", r"\|").unwrap();
        let id = extractor.extract_line("8=FIX.4 outgoing|ORD8=FIXX4tail8=FIX.4end");
        assert_eq!(id.as_deref(), Some("571=ORD8=FIXX4tail"));
    }

    #[test]
    fn test_cloud_requires_filter_and_outgoing() {
        let extractor = cloud();
        assert_eq!(extractor.extract_line("2024-01-01 outgoing A|B"), None);
        assert_eq!(extractor.extract_line("2024-01-01 FILTER incoming A|FILTER"), None);
    }

    #[test]
    fn test_cloud_drops_line_without_second_field() {
        let extractor = cloud();
        assert_eq!(extractor.extract_line("FILTER outgoing no split here"), None);
        // 尾端空欄位不計入
        assert_eq!(extractor.extract_line("FILTER outgoing A|"), None);
    }

    #[test]
    fn test_cloud_filter_missing_after_split_takes_whole_field() {
        let id = cloud().extract_line("FILTER outgoing|XYZ123|rest");
        assert_eq!(id.as_deref(), Some("571=XYZ123"));
    }

    #[test]
    fn test_cloud_filter_repeated_after_split_takes_first_segment() {
        let id = cloud().extract_line("outgoing|ABCFILTERdefFILTERghi");
        assert_eq!(id.as_deref(), Some("571=ABC"));
    }

    #[test]
    fn test_cloud_field_starting_with_filter_yields_bare_tag() {
        let id = cloud().extract_line("outgoing|FILTER");
        assert_eq!(id.as_deref(), Some("571="));
    }

    #[test]
    fn test_cloud_split_pattern_is_regex() {
        let extractor = CloudExtractor::new("8=FIX", r"\s*;\s*").unwrap();
        let id = extractor.extract_line("8=FIX outgoing ; ORD-42 8=FIX.4.4");
        assert_eq!(id.as_deref(), Some("571=ORD-42 "));
    }

    #[test]
    fn test_cloud_invalid_split_pattern() {
        let err = CloudExtractor::new("FILTER", "(unclosed").unwrap_err();
        assert!(matches!(err, ReconError::PatternError { .. }));
    }

    #[test]
    fn test_cloud_extract_preserves_order() {
        let lines = [
            "FILTER outgoing x|B FILTER",
            "noise",
            "FILTER outgoing x|A FILTER",
            "FILTER outgoing x|B FILTER",
        ];
        let ids = cloud().extract(lines);
        assert_eq!(ids, vec!["571=B ", "571=A ", "571=B "]);
    }

    #[test]
    fn test_mainframe_extracts_twelfth_field() {
        let extractor = MainframeExtractor::new("PFX");
        let id = extractor.extract_line("a|b|c|d|e|f|g|h|i|j|k|PFX123");
        assert_eq!(id.as_deref(), Some("PFX123"));
    }

    #[test]
    fn test_mainframe_drops_short_lines() {
        let extractor = MainframeExtractor::new("PFX");
        assert_eq!(extractor.extract_line("a|b|c|d|e|f|g|h|i|j|PFX123"), None);
        assert_eq!(extractor.extract_line("no delimiter PFX123"), None);
    }

    #[test]
    fn test_mainframe_requires_prefix() {
        let extractor = MainframeExtractor::new("PFX");
        assert_eq!(extractor.extract_line("a|b|c|d|e|f|g|h|i|j|k|XYZ123|m"), None);
        assert_eq!(
            extractor.extract_line("a|b|c|d|e|f|g|h|i|j|k|PFX9|m|n").as_deref(),
            Some("PFX9")
        );
    }

    #[test]
    fn test_mainframe_trailing_empty_fields_not_counted() {
        let extractor = MainframeExtractor::new("");
        assert_eq!(extractor.extract_line("a|b|c|d|e|f|g|h|i|j|k||"), None);
        assert_eq!(
            extractor.extract_line("a|b|c|d|e|f|g|h|i|j|k||x").as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_extract_empty_input() {
        let lines: Vec<String> = Vec::new();
        assert!(cloud().extract(&lines).is_empty());
        assert!(MainframeExtractor::new("PFX").extract(&lines).is_empty());
    }

    #[test]
    fn test_trim_trailing_empty() {
        assert_eq!(trim_trailing_empty(vec!["a", "", ""]), vec!["a"]);
        assert_eq!(trim_trailing_empty(vec!["", "a"]), vec!["", "a"]);
        assert!(trim_trailing_empty(vec!["", ""]).is_empty());
    }
}
