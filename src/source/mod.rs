pub mod mapper;
pub mod parser;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::model::SchoolRecord;
use crate::view::Profile;

pub use parser::CsvDialect;

pub const DEFAULT_SHEETS_BASE: &str = "https://docs.google.com/spreadsheets/d";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
pub const DEFAULT_JSON_URL: &str = "http://localhost:8080/api/schools";

/// Where the record collection comes from. Every variant is loaded through
/// [`Loader::load`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    /// `GET {url}` returning a JSON array of records.
    JsonEndpoint { url: String },
    /// A published spreadsheet exported as CSV.
    Spreadsheet {
        spreadsheet_id: String,
        sheet_name: String,
    },
    JsonFile(PathBuf),
    CsvFile(PathBuf),
}

impl DataSource {
    /// Picks a file source from the extension; anything but `.json` is CSV.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            DataSource::JsonFile(path)
        } else {
            DataSource::CsvFile(path)
        }
    }

    pub fn profile(&self) -> Profile {
        match self {
            DataSource::JsonEndpoint { .. } | DataSource::JsonFile(_) => Profile::json(),
            DataSource::Spreadsheet { .. } | DataSource::CsvFile(_) => Profile::spreadsheet(),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::JsonEndpoint { url } => write!(f, "json endpoint {url}"),
            DataSource::Spreadsheet {
                spreadsheet_id,
                sheet_name,
            } => write!(f, "spreadsheet {spreadsheet_id} ({sheet_name})"),
            DataSource::JsonFile(path) => write!(f, "json file {}", path.display()),
            DataSource::CsvFile(path) => write!(f, "csv file {}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build HTTP client: {source}")]
    HttpClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid source URL: {url}")]
    InvalidUrl { url: String },

    #[error("request failed: {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("failed to read response body: {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode records from {origin}: {source}")]
    JsonDecode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read file: {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV: {source}")]
    CsvDecode {
        #[source]
        source: csv::Error,
    },
}

/// Fetches the dataset once. No retries.
#[derive(Clone, Debug)]
pub struct Loader {
    client: reqwest::Client,
    dialect: CsvDialect,
    sheets_base: String,
}

impl Loader {
    pub fn new(timeout: Duration, dialect: CsvDialect) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| LoadError::HttpClientBuild { source })?;
        Ok(Self::from_client(client, dialect))
    }

    pub fn from_client(client: reqwest::Client, dialect: CsvDialect) -> Self {
        Self {
            client,
            dialect,
            sheets_base: DEFAULT_SHEETS_BASE.to_string(),
        }
    }

    /// Points spreadsheet sources at another host (mirrors, tests).
    pub fn with_sheets_base(mut self, base: impl Into<String>) -> Self {
        self.sheets_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// CSV export URL for a spreadsheet sheet.
    pub fn spreadsheet_url(&self, spreadsheet_id: &str, sheet_name: &str) -> Result<String, LoadError> {
        let raw = format!("{}/{}/gviz/tq", self.sheets_base, spreadsheet_id.trim());
        let mut url = reqwest::Url::parse(&raw).map_err(|_| LoadError::InvalidUrl { url: raw })?;
        url.query_pairs_mut()
            .append_pair("tqx", "out:csv")
            .append_pair("sheet", sheet_name);
        Ok(url.to_string())
    }

    pub async fn load(&self, source: &DataSource) -> Result<Vec<SchoolRecord>, LoadError> {
        info!(source = %source, "loading records");
        let records = match source {
            DataSource::JsonEndpoint { url } => {
                let body = self.fetch_text(url).await?;
                decode_json(&body, url)?
            }
            DataSource::Spreadsheet {
                spreadsheet_id,
                sheet_name,
            } => {
                let url = self.spreadsheet_url(spreadsheet_id, sheet_name)?;
                let body = self.fetch_text(&url).await?;
                self.decode_csv(&body)?
            }
            DataSource::JsonFile(path) => {
                let body = read_file(path).await?;
                decode_json(&body, &path.display().to_string())?
            }
            DataSource::CsvFile(path) => {
                let body = read_file(path).await?;
                self.decode_csv(&body)?
            }
        };
        info!(count = records.len(), "records loaded");
        Ok(records)
    }

    async fn fetch_text(&self, url: &str) -> Result<String, LoadError> {
        debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| LoadError::Request {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(|source| LoadError::Body {
            url: url.to_string(),
            source,
        })
    }

    fn decode_csv(&self, body: &str) -> Result<Vec<SchoolRecord>, LoadError> {
        let rows = parser::parse(body, self.dialect)?;
        debug!(rows = rows.len(), dialect = ?self.dialect, "csv tokenized");
        Ok(mapper::map_rows(rows))
    }
}

fn decode_json(body: &str, origin: &str) -> Result<Vec<SchoolRecord>, LoadError> {
    serde_json::from_str::<Vec<SchoolRecord>>(body).map_err(|source| LoadError::JsonDecode {
        origin: origin.to_string(),
        source,
    })
}

async fn read_file(path: &Path) -> Result<String, LoadError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::FileRead {
            path: path.display().to_string(),
            source,
        })
}
