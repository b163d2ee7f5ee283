use csv::{ReaderBuilder, Trim};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

pub const DIMENSIONS: usize = 60;

const LABEL_FIELD_INDEX: usize = DIMENSIONS;
const FIELDS_PER_RECORD: usize = DIMENSIONS + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    Mine,
    Rock,
}

impl Label {
    /// Both classes, ordered by their dataset code (`M` < `R`).
    pub const ALL: [Label; 2] = [Label::Mine, Label::Rock];

    pub fn code(self) -> &'static str {
        match self {
            Label::Mine => "M",
            Label::Rock => "R",
        }
    }

    pub fn from_code(code: &str) -> Option<Label> {
        match code {
            "M" => Some(Label::Mine),
            "R" => Some(Label::Rock),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Mine => f.write_str("Mine"),
            Label::Rock => f.write_str("Rock"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub features: [f64; DIMENSIONS],
    pub label: Label,
}

/// Every row of the sonar CSV, in file order. Never mutated after loading.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn count(&self, label: Label) -> usize {
        self.samples.iter().filter(|s| s.label == label).count()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("data file `{}` not found; place it in the working directory", path.display())]
    DataSourceMissing { path: PathBuf },

    #[error("failed to read `{}`: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: expected 61 columns, found {columns}")]
    Schema { row: usize, columns: usize },

    #[error("row {row}: unknown label `{value}`, expected `R` or `M`")]
    UnknownLabel { row: usize, value: String },

    #[error("row {row}, column {column}: `{value}` is not a number")]
    InvalidFeature {
        row: usize,
        column: usize,
        value: String,
    },
}

pub fn parse(file_path: &Path) -> Result<Dataset, DatasetError> {
    let file = File::open(file_path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            DatasetError::DataSourceMissing {
                path: file_path.to_path_buf(),
            }
        } else {
            DatasetError::Io {
                path: file_path.to_path_buf(),
                source,
            }
        }
    })?;

    let dataset = parse_reader(BufReader::new(file))?;
    tracing::info!(
        path = %file_path.display(),
        rows = dataset.len(),
        rocks = dataset.count(Label::Rock),
        mines = dataset.count(Label::Mine),
        "loaded sonar dataset"
    );

    Ok(dataset)
}

/// Reads headerless records: 60 feature columns followed by the `R`/`M` label.
pub fn parse_reader<R: Read>(source: R) -> Result<Dataset, DatasetError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let mut samples = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let row = index + 1;
        let record = result?;

        if record.len() != FIELDS_PER_RECORD {
            return Err(DatasetError::Schema {
                row,
                columns: record.len(),
            });
        }

        let label_str = record.get(LABEL_FIELD_INDEX).unwrap_or_default();
        let label = Label::from_code(label_str).ok_or_else(|| DatasetError::UnknownLabel {
            row,
            value: label_str.to_owned(),
        })?;

        let mut features = [0.0; DIMENSIONS];
        for (column, (slot, value)) in features.iter_mut().zip(record.iter()).enumerate() {
            *slot = value
                .parse::<f64>()
                .map_err(|_| DatasetError::InvalidFeature {
                    row,
                    column,
                    value: value.to_owned(),
                })?;
        }

        samples.push(Sample { features, label });
    }

    Ok(Dataset::new(samples))
}
