use crate::domain::model::{Classification, Identifier, Reconciliation, ReportFormat};
use crate::utils::error::{ReconError, Result};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

pub const DEFAULT_SHEET_NAME: &str = "Log Comparison";
const COLUMN_WIDTH: f64 = 28.0;

/// 三欄報表：欄位長度不同時，短欄位留空
#[derive(Debug, Clone, Copy)]
pub struct ReportTable<'a> {
    columns: [&'a [Identifier]; 3],
}

impl<'a> ReportTable<'a> {
    pub fn new(reconciliation: &'a Reconciliation) -> Self {
        Self {
            columns: Classification::ALL.map(|c| reconciliation.bucket(c)),
        }
    }

    pub fn headers() -> [&'static str; 3] {
        Classification::ALL.map(|c| c.header())
    }

    /// 資料列數 (不含標題列)
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(|c| c.len()).max().unwrap_or(0)
    }

    pub fn rows(&self) -> impl Iterator<Item = [Option<&'a str>; 3]> + '_ {
        (0..self.row_count()).map(move |i| self.columns.map(|c| c.get(i).map(String::as_str)))
    }
}

#[derive(Debug, Clone)]
pub struct ReportWriter {
    format: ReportFormat,
    sheet_name: String,
}

impl ReportWriter {
    pub fn new(format: ReportFormat) -> Self {
        Self {
            format,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    pub fn render(&self, reconciliation: &Reconciliation) -> Result<Vec<u8>> {
        let table = ReportTable::new(reconciliation);
        match self.format {
            ReportFormat::Xlsx => Ok(render_xlsx(&table, &self.sheet_name)?),
            ReportFormat::Csv => render_csv(&table),
        }
    }
}

fn render_xlsx(table: &ReportTable<'_>, sheet_name: &str) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet().set_name(sheet_name)?;

    for (col, header) in ReportTable::headers().iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *header, &header_format)?;
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
    }

    for (index, row) in table.rows().enumerate() {
        let row_num = (index + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            if let Some(value) = cell {
                worksheet.write_string(row_num, col as u16, *value)?;
            }
        }
    }

    workbook.save_to_buffer()
}

fn render_csv(table: &ReportTable<'_>) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(ReportTable::headers())?;

    for row in table.rows() {
        writer.write_record(row.map(|cell| cell.unwrap_or("")))?;
    }

    writer
        .into_inner()
        .map_err(|e| ReconError::IoError(e.into_error()))
}
