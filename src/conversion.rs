use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use crate::error::RowMapDbError;
use crate::types::RowValues;

/// Mapping between a record field type and the shared value enum.
///
/// Implemented for the field types the mapper supports; `Option<T>` of any
/// supported type maps NULL to `None`.
pub trait ColumnValue: Sized {
    fn to_row_value(&self) -> RowValues;

    /// # Errors
    /// Returns `RowMapDbError::ScanError` when the stored value does not fit
    /// this field type.
    fn from_row_value(value: &RowValues) -> Result<Self, RowMapDbError>;
}

fn mismatch(expected: &str, value: &RowValues) -> RowMapDbError {
    RowMapDbError::ScanError(format!("expected {expected}, found {value:?}"))
}

impl ColumnValue for i64 {
    fn to_row_value(&self) -> RowValues {
        RowValues::Int(*self)
    }

    fn from_row_value(value: &RowValues) -> Result<Self, RowMapDbError> {
        value.as_int().copied().ok_or_else(|| mismatch("integer", value))
    }
}

impl ColumnValue for i32 {
    fn to_row_value(&self) -> RowValues {
        RowValues::Int(i64::from(*self))
    }

    fn from_row_value(value: &RowValues) -> Result<Self, RowMapDbError> {
        let i = value.as_int().copied().ok_or_else(|| mismatch("integer", value))?;
        i32::try_from(i)
            .map_err(|_| RowMapDbError::ScanError(format!("integer {i} out of range for i32")))
    }
}

impl ColumnValue for f64 {
    fn to_row_value(&self) -> RowValues {
        RowValues::Float(*self)
    }

    fn from_row_value(value: &RowValues) -> Result<Self, RowMapDbError> {
        // Numeric affinity may hand back an integer for a REAL column.
        match value {
            RowValues::Float(f) => Ok(*f),
            #[allow(clippy::cast_precision_loss)]
            RowValues::Int(i) => Ok(*i as f64),
            _ => Err(mismatch("real", value)),
        }
    }
}

impl ColumnValue for bool {
    fn to_row_value(&self) -> RowValues {
        RowValues::Bool(*self)
    }

    fn from_row_value(value: &RowValues) -> Result<Self, RowMapDbError> {
        value.as_bool().ok_or_else(|| mismatch("boolean", value))
    }
}

impl ColumnValue for String {
    fn to_row_value(&self) -> RowValues {
        RowValues::Text(self.clone())
    }

    fn from_row_value(value: &RowValues) -> Result<Self, RowMapDbError> {
        value
            .as_text()
            .map(str::to_owned)
            .ok_or_else(|| mismatch("text", value))
    }
}

impl ColumnValue for NaiveDateTime {
    fn to_row_value(&self) -> RowValues {
        RowValues::Timestamp(*self)
    }

    fn from_row_value(value: &RowValues) -> Result<Self, RowMapDbError> {
        value.as_timestamp().ok_or_else(|| mismatch("timestamp", value))
    }
}

impl ColumnValue for Vec<u8> {
    fn to_row_value(&self) -> RowValues {
        RowValues::Blob(self.clone())
    }

    fn from_row_value(value: &RowValues) -> Result<Self, RowMapDbError> {
        value
            .as_blob()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| mismatch("blob", value))
    }
}

impl ColumnValue for JsonValue {
    fn to_row_value(&self) -> RowValues {
        RowValues::JSON(self.clone())
    }

    fn from_row_value(value: &RowValues) -> Result<Self, RowMapDbError> {
        match value {
            RowValues::JSON(jval) => Ok(jval.clone()),
            RowValues::Text(s) => serde_json::from_str(s)
                .map_err(|e| RowMapDbError::ScanError(format!("malformed json: {e}"))),
            _ => Err(mismatch("json", value)),
        }
    }
}

impl<T: ColumnValue> ColumnValue for Option<T> {
    fn to_row_value(&self) -> RowValues {
        self.as_ref().map_or(RowValues::Null, ColumnValue::to_row_value)
    }

    fn from_row_value(value: &RowValues) -> Result<Self, RowMapDbError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_row_value(value).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn round_trips_supported_types() {
        assert_eq!(i64::from_row_value(&42i64.to_row_value()).unwrap(), 42);
        assert_eq!(i32::from_row_value(&7i32.to_row_value()).unwrap(), 7);
        assert_eq!(f64::from_row_value(&1.5f64.to_row_value()).unwrap(), 1.5);
        assert!(bool::from_row_value(&true.to_row_value()).unwrap());
        assert_eq!(
            String::from_row_value(&"ann".to_string().to_row_value()).unwrap(),
            "ann"
        );
        assert_eq!(
            Vec::<u8>::from_row_value(&vec![1u8, 2].to_row_value()).unwrap(),
            vec![1u8, 2]
        );
        assert_eq!(
            JsonValue::from_row_value(&json!({"k": 1}).to_row_value()).unwrap(),
            json!({"k": 1})
        );
    }

    #[test]
    fn bool_accepts_stored_integers() {
        assert!(bool::from_row_value(&RowValues::Int(1)).unwrap());
        assert!(!bool::from_row_value(&RowValues::Int(0)).unwrap());
        assert!(bool::from_row_value(&RowValues::Int(2)).is_err());
    }

    #[test]
    fn timestamp_accepts_stored_text() {
        let dt = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let stored = RowValues::Text("2024-05-01 10:30:00".into());
        assert_eq!(NaiveDateTime::from_row_value(&stored).unwrap(), dt);
    }

    #[test]
    fn json_accepts_stored_text() {
        let stored = RowValues::Text(r#"{"k":1}"#.into());
        assert_eq!(JsonValue::from_row_value(&stored).unwrap(), json!({"k": 1}));
    }

    #[test]
    fn option_maps_null_both_ways() {
        assert_eq!(Option::<String>::None.to_row_value(), RowValues::Null);
        assert_eq!(
            Option::<String>::from_row_value(&RowValues::Null).unwrap(),
            None
        );
        assert_eq!(
            Option::<i64>::from_row_value(&RowValues::Int(3)).unwrap(),
            Some(3)
        );
    }

    #[test]
    fn mismatches_are_scan_errors() {
        let err = i64::from_row_value(&RowValues::Text("x".into())).unwrap_err();
        assert!(matches!(err, RowMapDbError::ScanError(_)));
    }
}
