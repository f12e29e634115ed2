//! Request decoding: JSON batch -> schema-checked feature matrix.
//!
//! Two layouts are accepted, matching what a tabular frame constructor
//! takes:
//! - records: `[{"amount": 42.0, "merchant_code": 7}, ...]`
//! - columns: `{"amount": [42.0, ...], "merchant_code": [7, ...]}`

use serde_json::{Map, Value};

use super::error::DecodeError;
use crate::models::{FeatureMatrix, FeatureValue, TransactionRecord};

#[derive(Debug, Clone)]
pub struct RequestParser {
    schema: Vec<String>,
}

impl RequestParser {
    /// `schema` lists the model's feature names in column order
    pub fn new(schema: Vec<String>) -> Self {
        Self { schema }
    }

    /// Decode a request body into a feature matrix
    pub fn decode(&self, payload: &Value) -> Result<FeatureMatrix, DecodeError> {
        let records = parse_records(payload, &self.schema)?;
        self.to_matrix(&records)
    }

    /// Lay schema-checked records out in the model's column order
    fn to_matrix(&self, records: &[TransactionRecord]) -> Result<FeatureMatrix, DecodeError> {
        let mut matrix = FeatureMatrix::new(self.schema.clone());
        let mut row_values = Vec::with_capacity(self.schema.len());

        for (row, record) in records.iter().enumerate() {
            row_values.clear();
            for field in &self.schema {
                let value = record.get(field).ok_or_else(|| DecodeError::MissingField {
                    row,
                    field: field.clone(),
                })?;
                row_values.push(value.as_f32());
            }
            matrix.push_row(&row_values);
        }

        Ok(matrix)
    }
}

/// Split a request body into typed records. Names outside `schema` are
/// rejected before any cell is type-checked; missing names are left to
/// the caller.
pub fn parse_records(payload: &Value, schema: &[String]) -> Result<Vec<TransactionRecord>, DecodeError> {
    match payload {
        Value::Array(rows) => rows
            .iter()
            .enumerate()
            .map(|(row, value)| match value {
                Value::Object(fields) => parse_record(row, fields, schema),
                _ => Err(DecodeError::RowNotObject { row }),
            })
            .collect(),
        Value::Object(columns) => parse_columns(columns, schema),
        _ => Err(DecodeError::UnsupportedShape),
    }
}

fn check_known<'a>(
    row: usize,
    names: impl IntoIterator<Item = &'a String>,
    schema: &[String],
) -> Result<(), DecodeError> {
    match names.into_iter().find(|name| !schema.contains(*name)) {
        Some(unknown) => Err(DecodeError::UnknownField {
            row,
            field: unknown.clone(),
        }),
        None => Ok(()),
    }
}

fn parse_record(
    row: usize,
    fields: &Map<String, Value>,
    schema: &[String],
) -> Result<TransactionRecord, DecodeError> {
    check_known(row, fields.keys(), schema)?;
    let mut record = TransactionRecord::new();
    for (name, value) in fields {
        record
            .fields
            .insert(name.clone(), parse_cell(row, name, value)?);
    }
    Ok(record)
}

fn parse_columns(
    columns: &Map<String, Value>,
    schema: &[String],
) -> Result<Vec<TransactionRecord>, DecodeError> {
    let mut expected_len: Option<usize> = None;
    let mut arrays = Vec::with_capacity(columns.len());

    for (name, column) in columns {
        let values = match column {
            Value::Array(values) => values,
            // An object of scalars has no row count to infer
            _ if expected_len.is_none() && columns.values().all(|v| !v.is_array()) => {
                return Err(DecodeError::UnsupportedShape)
            }
            _ => {
                return Err(DecodeError::ColumnNotArray {
                    field: name.clone(),
                })
            }
        };
        match expected_len {
            None => expected_len = Some(values.len()),
            Some(expected) if expected != values.len() => {
                return Err(DecodeError::ColumnLength {
                    field: name.clone(),
                    expected,
                    got: values.len(),
                })
            }
            Some(_) => {}
        }
        arrays.push((name, values));
    }
    // Every column spans all rows, so an unknown one is reported at row 0
    check_known(0, columns.keys(), schema)?;

    let rows = expected_len.unwrap_or(0);
    (0..rows)
        .map(|row| {
            let mut record = TransactionRecord::new();
            for (name, values) in &arrays {
                record
                    .fields
                    .insert((*name).clone(), parse_cell(row, name, &values[row])?);
            }
            Ok(record)
        })
        .collect()
}

fn parse_cell(row: usize, field: &str, value: &Value) -> Result<FeatureValue, DecodeError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(FeatureValue::Number)
            .ok_or_else(|| DecodeError::InvalidValue {
                row,
                field: field.to_string(),
            }),
        Value::Bool(b) => Ok(FeatureValue::Bool(*b)),
        Value::Null => Ok(FeatureValue::Missing),
        _ => Err(DecodeError::InvalidValue {
            row,
            field: field.to_string(),
        }),
    }
}
