use clickhouse::Row;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::{Error, Result};

/// A single field value of a point.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Int(i64),
    UInt(u64),
    Bool(bool),
    String(String),
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<u64> for FieldValue {
    fn from(v: u64) -> Self {
        FieldValue::UInt(v)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

/// A time-series point: measurement name, tags, fields and timestamp.
///
/// Tags and fields keep insertion order; setting a key twice keeps the last value.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub measurement: String,
    pub tags: Vec<(String, String)>,
    pub fields: Vec<(String, FieldValue)>,
    pub time: OffsetDateTime,
}

impl Point {
    pub fn new(measurement: impl Into<String>, time: OffsetDateTime) -> Self {
        Self {
            measurement: measurement.into(),
            tags: Vec::new(),
            fields: Vec::new(),
            time,
        }
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        upsert(&mut self.tags, key.into(), value.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        upsert(&mut self.fields, key.into(), value.into());
        self
    }

    /// Adds a float field only when `value` is present.
    pub fn field_opt(self, key: impl Into<String>, value: Option<f64>) -> Self {
        match value {
            Some(v) => self.field(key, v),
            None => self,
        }
    }

    /// Checks the point can be stored: a measurement name and at least one field.
    pub fn validate(&self) -> Result<()> {
        if self.measurement.trim().is_empty() {
            return Err(Error::InvalidPoint("measurement name is empty".to_string()));
        }
        if self.fields.is_empty() {
            return Err(Error::InvalidPoint(format!(
                "point `{}` has no fields",
                self.measurement
            )));
        }
        let empty_key = self.tags.iter().any(|(k, _)| k.is_empty())
            || self.fields.iter().any(|(k, _)| k.is_empty());
        if empty_key {
            return Err(Error::InvalidPoint(format!(
                "point `{}` has an empty tag or field key",
                self.measurement
            )));
        }
        Ok(())
    }

    /// Flattens the point into its storage row.
    pub fn to_row(&self) -> PointRow {
        let mut num_fields = Vec::new();
        let mut int_fields = Vec::new();
        let mut uint_fields = Vec::new();
        let mut str_fields = Vec::new();
        for (key, value) in &self.fields {
            match value {
                FieldValue::Float(v) => num_fields.push((key.clone(), *v)),
                FieldValue::Int(v) => int_fields.push((key.clone(), *v)),
                FieldValue::UInt(v) => uint_fields.push((key.clone(), *v)),
                FieldValue::Bool(v) => num_fields.push((key.clone(), if *v { 1.0 } else { 0.0 })),
                FieldValue::String(v) => str_fields.push((key.clone(), v.clone())),
            }
        }
        PointRow {
            measurement: self.measurement.clone(),
            tags: self.tags.clone(),
            num_fields,
            int_fields,
            uint_fields,
            str_fields,
            time: self.time,
        }
    }
}

fn upsert<V>(entries: &mut Vec<(String, V)>, key: String, value: V) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => entries.push((key, value)),
    }
}

/// Row of the metric points table.
///
/// Float and boolean fields are stored in `num_fields` (booleans as 0/1).
/// Integers keep their exact value in `int_fields` / `uint_fields`, and
/// string fields go to `str_fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Row)]
pub struct PointRow {
    pub measurement: String,
    pub tags: Vec<(String, String)>,
    pub num_fields: Vec<(String, f64)>,
    pub int_fields: Vec<(String, i64)>,
    pub uint_fields: Vec<(String, u64)>,
    pub str_fields: Vec<(String, String)>,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub time: OffsetDateTime,
}
