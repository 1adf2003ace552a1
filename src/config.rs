//! `KEY=VALUE` configuration file

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ConfigError, invalid_value};
use crate::generators::{DEFAULT_BRAID_FRACTION, GenerationConfig};
use crate::maze::Position;

/// Smallest accepted WIDTH or HEIGHT.
pub const MIN_SIZE: u16 = 2;
/// Largest accepted WIDTH or HEIGHT.
pub const MAX_SIZE: u16 = 99;

const REQUIRED_KEYS: [&str; 6] = ["WIDTH", "HEIGHT", "ENTRY", "EXIT", "OUTPUT_FILE", "PERFECT"];

/// Validated contents of a configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub rows: u16,
    pub cols: u16,
    pub entry: Position,
    pub exit: Position,
    pub output_file: PathBuf,
    pub perfect: bool,
    pub seed: Option<u64>,
    pub braid_fraction: f64,
}

impl Config {
    /// Reads and validates the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = text.parse::<Config>()?;
        tracing::debug!("[config] Loaded {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Generation request described by this configuration.
    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            rows: self.rows,
            cols: self.cols,
            entry: self.entry,
            exit: self.exit,
            perfect: self.perfect,
            seed: self.seed,
            braid_fraction: self.braid_fraction,
        }
    }
}

/// Splits the text into upper-cased keys and trimmed values. Later keys override earlier ones.
fn parse_entries(text: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut entries = HashMap::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::Syntax {
                line: idx + 1,
                text: line.to_string(),
            });
        };
        entries.insert(key.trim().to_uppercase(), value.trim().to_string());
    }
    Ok(entries)
}

fn parse_size(key: &'static str, value: &str) -> Result<u16, ConfigError> {
    let reason = format!("must be an integer between {MIN_SIZE} and {MAX_SIZE}");
    match value.parse::<u16>() {
        Ok(n) if (MIN_SIZE..=MAX_SIZE).contains(&n) => Ok(n),
        _ => Err(invalid_value(key, value, &reason)),
    }
}

/// Parses a `col,row` pair that must lie on the border of a `rows` x `cols` grid.
fn parse_endpoint(
    key: &'static str,
    value: &str,
    rows: u16,
    cols: u16,
) -> Result<Position, ConfigError> {
    let coords = value
        .split(',')
        .map(|part| part.trim().parse::<u16>())
        .collect::<Result<Vec<_>, _>>();
    let (col, row) = match coords.as_deref() {
        Ok(&[col, row]) => (col, row),
        _ => return Err(invalid_value(key, value, &"expected col,row (e.g. 0,0)")),
    };
    if row >= rows || col >= cols {
        return Err(invalid_value(key, value, &"out of bounds"));
    }
    if row != 0 && row != rows - 1 && col != 0 && col != cols - 1 {
        return Err(invalid_value(key, value, &"must be on the border"));
    }
    Ok(Position::new(row, col))
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let entries = parse_entries(text)?;
        if let Some(&key) = REQUIRED_KEYS.iter().find(|key| !entries.contains_key(**key)) {
            return Err(ConfigError::MissingKey { key });
        }
        let get = |key: &str| entries.get(key).map(String::as_str).unwrap_or_default();

        let cols = parse_size("WIDTH", get("WIDTH"))?;
        let rows = parse_size("HEIGHT", get("HEIGHT"))?;
        let entry = parse_endpoint("ENTRY", get("ENTRY"), rows, cols)?;
        let exit = parse_endpoint("EXIT", get("EXIT"), rows, cols)?;
        if entry == exit {
            return Err(invalid_value(
                "EXIT",
                get("EXIT"),
                &"must not be the same cell as ENTRY",
            ));
        }

        let output_file = get("OUTPUT_FILE");
        if output_file.is_empty() {
            return Err(invalid_value("OUTPUT_FILE", output_file, &"must not be empty"));
        }

        let perfect = match get("PERFECT").to_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => {
                return Err(invalid_value(
                    "PERFECT",
                    get("PERFECT"),
                    &"must be True or False",
                ));
            }
        };

        let seed = match entries.get("SEED") {
            Some(value) => Some(
                value
                    .parse::<u64>()
                    .map_err(|e| invalid_value("SEED", value, &e))?,
            ),
            None => None,
        };

        let braid_fraction = match entries.get("BRAID_FRACTION") {
            Some(value) => match value.parse::<f64>() {
                Ok(f) if (0.0..=1.0).contains(&f) => f,
                _ => {
                    return Err(invalid_value(
                        "BRAID_FRACTION",
                        value,
                        &"must be a number between 0.0 and 1.0",
                    ));
                }
            },
            None => DEFAULT_BRAID_FRACTION,
        };

        Ok(Config {
            rows,
            cols,
            entry,
            exit,
            output_file: PathBuf::from(output_file),
            perfect,
            seed,
            braid_fraction,
        })
    }
}
