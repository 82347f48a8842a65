//! Header-addressed tabular data shared by the CSV and XLSX readers.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use super::SourceError;
use crate::models::listing::Listing;

const COL_ID: &str = "id_pekerjaan";
const COL_COMPANY_ID: &str = "id_perusahaan";
const COL_COMPANY_NAME: &str = "nama_perusahaan";
const COL_TITLE: &str = "job_title_group";
const COL_DESCRIPTION: &str = "deskripsi";
const COL_STATE_ID: &str = "state_id";
const COL_STATE_NAME: &str = "state_name";
const COL_JOB_TYPE: &str = "jenis_pekerjaan_terformat";
const COL_EXPERIENCE: &str = "tingkat_pengalaman_terformat";
const COL_SALARY_MIN: &str = "gaji_monthly_min";
const COL_SALARY_MAX: &str = "gaji_monthly_max";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    fn from_field(field: &str) -> Self {
        if field.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(field.to_string())
        }
    }

    fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::from_field(s),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            other => Cell::Text(other.to_string()),
        }
    }

    /// Missing cells read as the empty string.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
        }
    }

    /// Nullable integer. Accepts float-encoded whole numbers such as `12.0`.
    pub fn integer(&self) -> Option<i64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => n.is_finite().then(|| n.round() as i64),
            Cell::Text(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|n| n.is_finite())
                        .map(|n| n.round() as i64)
                })
            }
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// Column positions resolved once per table. Optional columns may be absent.
struct Columns {
    id: Option<usize>,
    company_id: Option<usize>,
    company_name: Option<usize>,
    title: usize,
    description: usize,
    state_id: usize,
    state_name: usize,
    job_type: usize,
    experience: usize,
    salary_min: Option<usize>,
    salary_max: Option<usize>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let headers = headers
            .into_iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        Self { headers, rows }
    }

    pub fn from_csv(bytes: &[u8]) -> Result<Self, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);

        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(Cell::from_field).collect());
        }
        Ok(Self::new(headers, rows))
    }

    /// Reads the first worksheet; its first row is the header.
    pub fn from_xlsx(bytes: &[u8]) -> Result<Self, SourceError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(SourceError::EmptyWorkbook)??;

        let mut rows = range.rows();
        let headers = rows
            .next()
            .map(|header| header.iter().map(|d| Cell::from_data(d).text()).collect())
            .unwrap_or_default();
        let rows = rows
            .map(|row| row.iter().map(Cell::from_data).collect())
            .collect();
        Ok(Self::new(headers, rows))
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn require(&self, name: &str) -> Result<usize, SourceError> {
        self.column(name)
            .ok_or_else(|| SourceError::MissingColumn(name.to_string()))
    }

    fn columns(&self) -> Result<Columns, SourceError> {
        Ok(Columns {
            id: self.column(COL_ID),
            company_id: self.column(COL_COMPANY_ID),
            company_name: self.column(COL_COMPANY_NAME),
            title: self.require(COL_TITLE)?,
            description: self.require(COL_DESCRIPTION)?,
            state_id: self.require(COL_STATE_ID)?,
            state_name: self.require(COL_STATE_NAME)?,
            job_type: self.require(COL_JOB_TYPE)?,
            experience: self.require(COL_EXPERIENCE)?,
            salary_min: self.column(COL_SALARY_MIN),
            salary_max: self.column(COL_SALARY_MAX),
        })
    }

    /// Maps rows to listings. Blank rows are dropped; blank cells become
    /// empty strings, `None` ids and zero salaries.
    pub fn into_listings(self) -> Result<Vec<Listing>, SourceError> {
        let cols = self.columns()?;

        let listings = self
            .rows
            .iter()
            .filter(|row| row.iter().any(|cell| *cell != Cell::Empty))
            .map(|row| {
                let at = |index: usize| row.get(index);
                let text = |index: usize| at(index).map(Cell::text).unwrap_or_default();
                let optional = |index: Option<usize>| index.and_then(at);

                Listing {
                    id: optional(cols.id).and_then(Cell::integer),
                    company_id: optional(cols.company_id).and_then(Cell::integer),
                    company_name: optional(cols.company_name)
                        .map(Cell::text)
                        .unwrap_or_default()
                        .trim()
                        .to_string(),
                    title: text(cols.title),
                    description: text(cols.description),
                    state_id: text(cols.state_id).trim().to_uppercase(),
                    state_name: text(cols.state_name).trim().to_string(),
                    job_type: text(cols.job_type).trim().to_string(),
                    experience_level: text(cols.experience).trim().to_string(),
                    salary_min: optional(cols.salary_min)
                        .and_then(Cell::number)
                        .unwrap_or(0.0),
                    salary_max: optional(cols.salary_max)
                        .and_then(Cell::number)
                        .unwrap_or(0.0),
                }
            })
            .collect();

        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id_pekerjaan,id_perusahaan,nama_perusahaan,job_title_group,deskripsi,state_id,state_name,jenis_pekerjaan_terformat,tingkat_pengalaman_terformat,gaji_monthly_min,gaji_monthly_max";

    #[test]
    fn test_cell_integer_accepts_float_encoding() {
        assert_eq!(Cell::Number(12.0).integer(), Some(12));
        assert_eq!(Cell::Text(" 42 ".into()).integer(), Some(42));
        assert_eq!(Cell::Text("7.0".into()).integer(), Some(7));
        assert_eq!(Cell::Text("n/a".into()).integer(), None);
        assert_eq!(Cell::Empty.integer(), None);
    }

    #[test]
    fn test_cell_text_renders_whole_numbers_without_fraction() {
        assert_eq!(Cell::Number(3.0).text(), "3");
        assert_eq!(Cell::Number(2.5).text(), "2.5");
        assert_eq!(Cell::Empty.text(), "");
    }

    #[test]
    fn test_csv_rows_map_to_listings() {
        let csv = format!(
            "{HEADER}\n\
             101,9,Acme Corp,$30/hr | Data Analyst,\"Analyze data\nwith SQL\", tx ,Texas,full-time,Entry level,4166.67,5833.33\n\
             ,,,Data Scientist,,CA,California,contract,Mid-Senior level,,\n\
             ,,,,,,,,,,\n"
        );

        let listings = Table::from_csv(csv.as_bytes())
            .unwrap()
            .into_listings()
            .unwrap();

        assert_eq!(listings.len(), 2);
        let first = &listings[0];
        assert_eq!(first.id, Some(101));
        assert_eq!(first.company_id, Some(9));
        assert_eq!(first.company_name, "Acme Corp");
        assert_eq!(first.title, "$30/hr | Data Analyst");
        assert_eq!(first.description, "Analyze data\nwith SQL");
        assert_eq!(first.state_id, "TX");
        assert!((first.salary_min - 4166.67).abs() < 1e-9);

        let second = &listings[1];
        assert_eq!(second.id, None);
        assert_eq!(second.description, "");
        assert_eq!(second.salary_min, 0.0);
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let csv = "job_title_group,deskripsi,state_id,state_name,jenis_pekerjaan_terformat,tingkat_pengalaman_terformat\n\
                   Analyst,text,NY,New York,full-time,Entry level\n";
        let listings = Table::from_csv(csv.as_bytes())
            .unwrap()
            .into_listings()
            .unwrap();
        assert_eq!(listings[0].id, None);
        assert_eq!(listings[0].company_name, "");
    }

    #[test]
    fn test_missing_required_column_is_schema_error() {
        let csv = "id_pekerjaan,job_title_group\n1,Analyst\n";
        let err = Table::from_csv(csv.as_bytes())
            .unwrap()
            .into_listings()
            .unwrap_err();
        assert!(matches!(err, SourceError::MissingColumn(ref c) if c == "deskripsi"));
    }

    #[test]
    fn test_byte_order_mark_stripped_from_header() {
        let csv = format!("\u{feff}{HEADER}\n1,,,Analyst,,NY,New York,,,,\n");
        let listings = Table::from_csv(csv.as_bytes())
            .unwrap()
            .into_listings()
            .unwrap();
        assert_eq!(listings[0].id, Some(1));
    }

    #[test]
    fn test_xlsx_first_sheet_maps_to_listings() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, name) in HEADER.split(',').enumerate() {
            sheet.write_string(0, col as u16, name).unwrap();
        }
        sheet.write_number(1, 0, 55.0).unwrap();
        sheet.write_string(1, 3, "Data Engineer in Austin").unwrap();
        sheet.write_string(1, 4, "Pipelines").unwrap();
        sheet.write_string(1, 5, "TX").unwrap();
        sheet.write_string(1, 6, "Texas").unwrap();
        sheet.write_string(1, 7, "full-time").unwrap();
        sheet.write_string(1, 8, "Associate").unwrap();
        sheet.write_number(1, 9, 6000.4).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let listings = Table::from_xlsx(&bytes).unwrap().into_listings().unwrap();

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].id, Some(55));
        assert_eq!(listings[0].company_id, None);
        assert_eq!(listings[0].title, "Data Engineer in Austin");
        assert!((listings[0].salary_min - 6000.4).abs() < 1e-9);
        assert_eq!(listings[0].salary_max, 0.0);
    }

    #[test]
    fn test_garbage_bytes_are_workbook_error() {
        let err = Table::from_xlsx(b"definitely not a zip archive").unwrap_err();
        assert!(matches!(err, SourceError::Workbook(_)));
    }
}
