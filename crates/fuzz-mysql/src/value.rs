//! Conversion between generated values and `mysql_async::Value`.

use chrono::{Datelike, NaiveDate, Timelike};
use fuzz_core::GeneratedValue;
use mysql_async::Value;

/// MySQL parameter wrapper for generated values.
#[derive(Debug, Clone, PartialEq)]
pub struct MySqlParam(pub Value);

impl MySqlParam {
    /// Get the inner mysql_async::Value.
    pub fn into_inner(self) -> Value {
        self.0
    }

    /// Read a value returned by the server back into a [`GeneratedValue`].
    ///
    /// Used for latest-value lookups, whose result is bound again as a
    /// foreign-key parameter, so only the textual form has to survive.
    pub fn into_generated(self) -> GeneratedValue {
        match self.0 {
            Value::NULL => GeneratedValue::Null,
            Value::Int(i) => GeneratedValue::Int(i),
            Value::UInt(u) => match i64::try_from(u) {
                Ok(i) => GeneratedValue::Int(i),
                Err(_) => GeneratedValue::Text(u.to_string()),
            },
            Value::Float(f) => GeneratedValue::Float(f64::from(f)),
            Value::Double(f) => GeneratedValue::Float(f),
            Value::Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(s) => GeneratedValue::Text(s),
                Err(e) => GeneratedValue::Bytes(e.into_bytes()),
            },
            Value::Date(year, month, day, hour, minute, second, micros) => {
                NaiveDate::from_ymd_opt(year.into(), month.into(), day.into())
                    .and_then(|d| {
                        d.and_hms_micro_opt(hour.into(), minute.into(), second.into(), micros)
                    })
                    .map(GeneratedValue::DateTime)
                    // Zero dates ('0000-00-00') have no chrono representation
                    .unwrap_or_else(|| {
                        GeneratedValue::Text(format!(
                            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                        ))
                    })
            }
            Value::Time(negative, days, hours, minutes, seconds, _) => {
                let sign = if negative { "-" } else { "" };
                let hours = days * 24 + u32::from(hours);
                GeneratedValue::Text(format!("{sign}{hours:02}:{minutes:02}:{seconds:02}"))
            }
        }
    }
}

impl From<GeneratedValue> for MySqlParam {
    fn from(value: GeneratedValue) -> Self {
        match value {
            GeneratedValue::Null => MySqlParam(Value::NULL),
            // MySQL booleans are TINYINT(1)
            GeneratedValue::Bool(b) => MySqlParam(Value::Int(i64::from(b))),
            GeneratedValue::Int(i) => MySqlParam(Value::Int(i)),
            GeneratedValue::Float(f) => MySqlParam(Value::Double(f)),
            GeneratedValue::Text(s) => MySqlParam(Value::Bytes(s.into_bytes())),
            GeneratedValue::Bytes(b) => MySqlParam(Value::Bytes(b)),
            GeneratedValue::Json(j) => MySqlParam(Value::Bytes(j.to_string().into_bytes())),
            GeneratedValue::DateTime(dt) => MySqlParam(Value::Date(
                dt.year() as u16,
                dt.month() as u8,
                dt.day() as u8,
                dt.hour() as u8,
                dt.minute() as u8,
                dt.second() as u8,
                0,
            )),
        }
    }
}
