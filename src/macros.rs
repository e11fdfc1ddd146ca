/// Declare the [`crate::TableRecord`] binding for a struct, pairing each
/// field with the column it maps to.
///
/// The identifier field comes first under `key` and must be an `i64`; the
/// remaining fields are data columns, listed in the positional binding
/// order. The resulting descriptor is validated when a [`crate::Table`] is
/// constructed.
///
/// ```rust
/// use rowmap::table_record;
///
/// #[derive(Debug, Default, Clone, PartialEq)]
/// struct User {
///     id: i64,
///     name: String,
///     age: i64,
/// }
///
/// table_record! {
///     User => "users" {
///         key id: "id",
///         name: "name",
///         age: "age",
///     }
/// }
/// ```
#[macro_export]
macro_rules! table_record {
    (
        $record:ty => $table:literal {
            key $key_field:ident : $key_column:literal,
            $( $field:ident : $column:literal ),+ $(,)?
        }
    ) => {
        impl $crate::TableRecord for $record {
            fn schema() -> $crate::TableSchemaBuilder {
                $crate::TableSchema::builder($table)
                    .key($key_column)
                    $( .column($column) )+
            }

            fn key(&self) -> i64 {
                self.$key_field
            }

            fn set_key(&mut self, key: i64) {
                self.$key_field = key;
            }

            fn data_values(&self) -> ::std::vec::Vec<$crate::RowValues> {
                ::std::vec![
                    $( $crate::ColumnValue::to_row_value(&self.$field) ),+
                ]
            }

            fn apply_row(
                &mut self,
                row: &$crate::DbRow,
            ) -> ::std::result::Result<(), $crate::RowMapDbError> {
                let mut idx = 0usize;
                let value = row.get_by_index(idx).ok_or_else(|| {
                    $crate::RowMapDbError::ScanError(::std::format!(
                        "row has no column at position {idx} (expected `{}`)",
                        $key_column
                    ))
                })?;
                self.$key_field = $crate::ColumnValue::from_row_value(value)?;
                $(
                    idx += 1;
                    let value = row.get_by_index(idx).ok_or_else(|| {
                        $crate::RowMapDbError::ScanError(::std::format!(
                            "row has no column at position {idx} (expected `{}`)",
                            $column
                        ))
                    })?;
                    self.$field = $crate::ColumnValue::from_row_value(value)?;
                )+
                if row.len() != idx + 1 {
                    return ::std::result::Result::Err($crate::RowMapDbError::ScanError(
                        ::std::format!(
                            "row has {} columns but record expects {}",
                            row.len(),
                            idx + 1
                        ),
                    ));
                }
                ::std::result::Result::Ok(())
            }
        }
    };
}
