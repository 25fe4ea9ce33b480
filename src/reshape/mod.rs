use chrono_tz::Tz;
use log::warn;
use thiserror::Error;

pub mod custom_data;
pub mod timezone;


use crate::settings::Settings;
use timezone::TimestampError;

#[derive(Debug, PartialEq, Error)]
pub enum ReshapeError {
    #[error("column '{column}': {source}")]
    Timestamp {
        column: String,
        source: TimestampError,
    },
    #[error("row has {found} fields, expected {expected}")]
    FieldCount { expected: usize, found: usize },
}

/// Per-run transformation plan, resolved once against the input header.
/// `reshape_row` itself is pure and keeps no state between calls.
pub struct Reshaper {
    source_tz: Tz,
    target_tz: Tz,
    timestamp_columns: Vec<usize>,
    custom_data_column: Option<usize>,
    custom_headers: Vec<String>,
    output_header: Vec<String>,
}

impl Reshaper {
    pub fn new(settings: &Settings, header: &[String]) -> Reshaper {
        let timestamp_columns = settings
            .timestamp_columns
            .iter()
            .filter_map(|name| {
                let idx = header.iter().position(|h| h == name);
                if idx.is_none() {
                    warn!("timestamp column '{}' not present in input, skipping", name);
                }
                idx
            })
            .collect();

        let custom_data_column = header.iter().position(|h| h == &settings.custom_data_column);

        // A configured header that collides with an input column (or repeats)
        // is a redundant addition and gets dropped.
        let mut custom_headers: Vec<String> = Vec::new();
        for name in &settings.custom_column_headers {
            if header.contains(name) || custom_headers.contains(name) {
                warn!("custom column header '{}' already present, skipping", name);
            } else {
                custom_headers.push(name.clone());
            }
        }

        let mut output_header = header.to_vec();
        output_header.extend(custom_headers.iter().cloned());

        Reshaper {
            source_tz: settings.default_timezone,
            target_tz: settings.output_timezone,
            timestamp_columns,
            custom_data_column,
            custom_headers,
            output_header,
        }
    }

    /// Input columns in original order, then custom headers in configured order.
    pub fn output_header(&self) -> &[String] {
        &self.output_header
    }

    /// Transforms one input row into one output row: every field is copied
    /// unchanged except the designated timestamp columns, which are converted
    /// from the source to the target timezone, and one value per custom header
    /// is appended at the end.
    pub fn reshape_row(&self, row: &[String]) -> Result<Vec<String>, ReshapeError> {
        let input_width = self.output_header.len() - self.custom_headers.len();
        if row.len() != input_width {
            return Err(ReshapeError::FieldCount {
                expected: input_width,
                found: row.len(),
            });
        }

        let mut out = row.to_vec();

        for &idx in &self.timestamp_columns {
            out[idx] = timezone::convert(&row[idx], self.source_tz, self.target_tz).map_err(
                |source| ReshapeError::Timestamp {
                    column: self.output_header[idx].clone(),
                    source,
                },
            )?;
        }

        let custom_values = self
            .custom_data_column
            .and_then(|idx| custom_data::parse(&row[idx]));
        for name in &self.custom_headers {
            let value = custom_values
                .as_ref()
                .and_then(|map| map.get(name))
                .map(custom_data::value_to_string)
                .unwrap_or_default();
            out.push(value);
        }

        Ok(out)
    }
}
