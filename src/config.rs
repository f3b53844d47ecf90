use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::readers::ReadOptions;
use crate::utils::constants::{DEFAULT_DIVIDER, DEFAULT_EPOCH, DEFAULT_NA_MARKER, ENV_PREFIX};

// The "new" layout matches the final-sample workbook: fourth sheet, header on
// row 9, a units row under the header.
const DEFAULT_CONFIG: &str = r#"
[format]
divider = " "
default_epoch = "2000.0"

[input]
na_values = ["~"]

[input.new]
sheet_index = 3
header_row = 8
skip_rows = 1

[input.followup]
sheet_index = 0
header_row = 0
skip_rows = 1

[input.format]
sheet_index = 0
header_row = 0
skip_rows = 0

[columns]
target = "identifier"
coordinates = "RA/DEC (J2000)"
magnitude = "Mag K"
magnitude_fallback = "Mag V"
spectral_type = "spec. type"
observed = "Observed?"
detections = "Detections"
"#;

/// Which worklist is being built; each reads its own sheet layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    New,
    FollowUp,
    Format,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorklistConfig {
    pub format: FormatConfig,
    pub input: InputConfig,
    pub columns: ColumnNames,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Separator placed between coordinate components
    pub divider: String,
    pub default_epoch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// A list in files, comma-separated text in the environment
    #[serde(deserialize_with = "list_or_csv")]
    pub na_values: Vec<String>,
    pub new: SheetLayout,
    pub followup: SheetLayout,
    pub format: SheetLayout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    pub sheet_index: usize,
    pub header_row: usize,
    pub skip_rows: usize,
}

/// Spreadsheet headers the selection pipelines read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnNames {
    pub target: String,
    pub coordinates: String,
    pub magnitude: String,
    pub magnitude_fallback: String,
    pub spectral_type: String,
    pub observed: String,
    pub detections: String,
}

impl WorklistConfig {
    /// Load built-in defaults, then `path` if given, then `WORKLIST_*` variables.
    ///
    /// Environment values stay text; numeric fields are converted during
    /// deserialization so string fields such as `2000.0` keep their spelling.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn layout(&self, pipeline: Pipeline) -> SheetLayout {
        match pipeline {
            Pipeline::New => self.input.new,
            Pipeline::FollowUp => self.input.followup,
            Pipeline::Format => self.input.format,
        }
    }

    pub fn read_options(&self, pipeline: Pipeline) -> ReadOptions {
        let layout = self.layout(pipeline);
        ReadOptions {
            sheet_index: layout.sheet_index,
            header_row: layout.header_row,
            skip_rows: layout.skip_rows,
            na_values: self.input.na_values.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn list_or_csv<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrCsv {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match ListOrCsv::deserialize(deserializer)? {
        ListOrCsv::List(values) => values,
        ListOrCsv::Csv(text) => text.split(',').map(|v| v.trim().to_string()).collect(),
    })
}

impl Default for WorklistConfig {
    fn default() -> Self {
        Self {
            format: FormatConfig {
                divider: DEFAULT_DIVIDER.to_string(),
                default_epoch: DEFAULT_EPOCH.to_string(),
            },
            input: InputConfig {
                na_values: vec![DEFAULT_NA_MARKER.to_string()],
                new: SheetLayout {
                    sheet_index: 3,
                    header_row: 8,
                    skip_rows: 1,
                },
                followup: SheetLayout {
                    sheet_index: 0,
                    header_row: 0,
                    skip_rows: 1,
                },
                format: SheetLayout {
                    sheet_index: 0,
                    header_row: 0,
                    skip_rows: 0,
                },
            },
            columns: ColumnNames::default(),
        }
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            target: "identifier".to_string(),
            coordinates: "RA/DEC (J2000)".to_string(),
            magnitude: "Mag K".to_string(),
            magnitude_fallback: "Mag V".to_string(),
            spectral_type: "spec. type".to_string(),
            observed: "Observed?".to_string(),
            detections: "Detections".to_string(),
        }
    }
}
