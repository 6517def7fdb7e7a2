use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::OnceCell;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Dataset load failures. Every one of them stops server startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column `{0}` is missing")]
    MissingColumn(&'static str),

    #[error("row {row}: cannot parse {column} value `{value}`")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// One line item of an invoice
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub invoice_no: String,
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
    /// Line total; taken from `TotalPrice` or computed as `UnitPrice * Quantity`
    pub total_price: f64,
    pub invoice_date: NaiveDateTime,
    pub country: String,
}

/// The whole transaction table, read-only after load
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<SalesRecord>,
    min_date: Option<NaiveDate>,
    max_date: Option<NaiveDate>,
}

const INVOICE_NO: &str = "InvoiceNo";
const DESCRIPTION: &str = "Description";
const QUANTITY: &str = "Quantity";
const UNIT_PRICE: &str = "UnitPrice";
const TOTAL_PRICE: &str = "TotalPrice";
const INVOICE_DATE: &str = "InvoiceDate";
const COUNTRY: &str = "Country";

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Header positions of the columns we read
struct Columns {
    invoice_no: usize,
    description: usize,
    quantity: usize,
    invoice_date: usize,
    country: usize,
    price: PriceColumn,
}

enum PriceColumn {
    Total { total: usize, unit: Option<usize> },
    Unit(usize),
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{FEFF}').trim() == name)
        };
        let require = |name: &'static str| find(name).ok_or(LoadError::MissingColumn(name));

        let price = match (find(TOTAL_PRICE), find(UNIT_PRICE)) {
            (Some(total), unit) => PriceColumn::Total { total, unit },
            (None, Some(unit)) => PriceColumn::Unit(unit),
            (None, None) => return Err(LoadError::MissingColumn(TOTAL_PRICE)),
        };

        Ok(Self {
            invoice_no: require(INVOICE_NO)?,
            description: require(DESCRIPTION)?,
            quantity: require(QUANTITY)?,
            invoice_date: require(INVOICE_DATE)?,
            country: require(COUNTRY)?,
            price,
        })
    }
}

impl Dataset {
    /// Read and parse the CSV file at `path`
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = Columns::locate(reader.headers()?)?;

        let mut records = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row?;
            // +1 for the header, +1 to make it 1-based
            let row_number = idx + 2;
            records.push(parse_record(&row, &columns, row_number)?);
        }

        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        let min_date = records.iter().map(|r| r.invoice_date.date()).min();
        let max_date = records.iter().map(|r| r.invoice_date.date()).max();
        Self {
            records,
            min_date,
            max_date,
        }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest invoice date, None for an empty dataset
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.min_date
    }

    pub fn max_date(&self) -> Option<NaiveDate> {
        self.max_date
    }
}

fn parse_record(
    row: &csv::StringRecord,
    columns: &Columns,
    row_number: usize,
) -> Result<SalesRecord, LoadError> {
    let field = |idx: usize| row.get(idx).unwrap_or("");
    let invalid = |column: &'static str, value: &str| LoadError::InvalidField {
        row: row_number,
        column,
        value: value.to_string(),
    };

    let raw_quantity = field(columns.quantity);
    let quantity: i64 = raw_quantity
        .parse()
        .map_err(|_| invalid(QUANTITY, raw_quantity))?;

    let parse_price = |column: &'static str, idx: usize| {
        let raw = field(idx);
        raw.parse::<f64>().map_err(|_| invalid(column, raw))
    };

    let (unit_price, total_price) = match columns.price {
        PriceColumn::Total { total, unit } => {
            let total_price = parse_price(TOTAL_PRICE, total)?;
            let unit_price = match unit {
                Some(idx) => parse_price(UNIT_PRICE, idx)?,
                None if quantity != 0 => total_price / quantity as f64,
                None => 0.0,
            };
            (unit_price, total_price)
        }
        PriceColumn::Unit(idx) => {
            let unit_price = parse_price(UNIT_PRICE, idx)?;
            (unit_price, unit_price * quantity as f64)
        }
    };

    let raw_date = field(columns.invoice_date);
    let invoice_date = parse_invoice_date(raw_date).ok_or_else(|| invalid(INVOICE_DATE, raw_date))?;

    let invoice_no = field(columns.invoice_no);
    if invoice_no.is_empty() {
        return Err(invalid(INVOICE_NO, invoice_no));
    }

    Ok(SalesRecord {
        invoice_no: invoice_no.to_string(),
        description: field(columns.description).to_string(),
        quantity,
        unit_price,
        total_price,
        invoice_date,
        country: field(columns.country).to_string(),
    })
}

/// Parses the date-time formats seen in exported e-commerce CSVs.
/// A bare date means midnight.
pub fn parse_invoice_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Load-once handle to the dataset.
///
/// The file is read on the first `get_or_load` call; concurrent callers
/// wait for that single load and every later call returns the same `Arc`.
#[derive(Debug)]
pub struct DatasetHandle {
    path: PathBuf,
    cell: OnceCell<Arc<Dataset>>,
}

impl DatasetHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get_or_load(&self) -> Result<Arc<Dataset>, LoadError> {
        self.cell
            .get_or_try_init(|| {
                let started = std::time::Instant::now();
                let dataset = Dataset::load(&self.path)?;
                tracing::info!(
                    path = %self.path.display(),
                    rows = dataset.len(),
                    min_date = ?dataset.min_date(),
                    max_date = ?dataset.max_date(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Dataset loaded"
                );
                Ok::<_, LoadError>(Arc::new(dataset))
            })
            .cloned()
    }
}
