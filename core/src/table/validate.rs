//! Row and column validation
//!
//! Everything here runs before a table is touched, so a rejected row or
//! column leaves no trace.

use log::warn;

use crate::models::{ColumnDefinition, Incompatibility, Value};
use super::error::{TableError, TableResult};

/// Check that a row supplies exactly one value per column
pub fn check_arity(expected: usize, actual: usize) -> TableResult<()> {
    if actual > expected {
        return Err(TableError::TooManyValues { expected, actual });
    }
    if actual < expected {
        return Err(TableError::TooFewValues { expected, actual });
    }
    Ok(())
}

/// Check one value against the column at `position`
pub fn check_value(definition: &ColumnDefinition, position: usize, value: &Value) -> TableResult<()> {
    definition.validate(value).map_err(|incompatibility| match incompatibility {
        Incompatibility::WrongType { expected, actual } => TableError::TypeMismatch {
            column: definition.name.clone(),
            position,
            expected,
            actual,
        },
        Incompatibility::TooLong { max, actual } => TableError::ValueTooLong {
            column: definition.name.clone(),
            position,
            max,
            actual,
        },
    })
}

/// Check a full row against the columns, given in column order
///
/// Arity is checked first, then every value in order; the first failure is
/// returned.
pub fn check_row(definitions: &[&ColumnDefinition], values: &[Value]) -> TableResult<()> {
    let result = check_arity(definitions.len(), values.len()).and_then(|_| {
        definitions
            .iter()
            .zip(values)
            .enumerate()
            .try_for_each(|(position, (definition, value))| check_value(definition, position, value))
    });
    if let Err(err) = &result {
        warn!("rejected row: {}", err);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnType, ValueType};

    fn people() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("name", ColumnType::VarChar(5)),
            ColumnDefinition::new("age", ColumnType::Integer),
        ]
    }

    #[test]
    fn test_arity() {
        assert_eq!(check_arity(2, 2), Ok(()));
        assert_eq!(
            check_arity(2, 3),
            Err(TableError::TooManyValues { expected: 2, actual: 3 })
        );
        assert_eq!(
            check_arity(2, 0),
            Err(TableError::TooFewValues { expected: 2, actual: 0 })
        );
    }

    #[test]
    fn test_row_type_mismatch_names_column() {
        let columns = people();
        let definitions: Vec<&ColumnDefinition> = columns.iter().collect();

        let result = check_row(&definitions, &[Value::from("Carol"), Value::from("thirty")]);

        assert_eq!(
            result,
            Err(TableError::TypeMismatch {
                column: "age".to_string(),
                position: 1,
                expected: ColumnType::Integer,
                actual: ValueType::Text,
            })
        );
    }

    #[test]
    fn test_row_value_too_long() {
        let columns = people();
        let definitions: Vec<&ColumnDefinition> = columns.iter().collect();

        let result = check_row(&definitions, &[Value::from("Bartholomew"), Value::from(40)]);

        assert_eq!(
            result,
            Err(TableError::ValueTooLong {
                column: "name".to_string(),
                position: 0,
                max: 5,
                actual: 11,
            })
        );
    }

    #[test]
    fn test_arity_checked_before_types() {
        let columns = people();
        let definitions: Vec<&ColumnDefinition> = columns.iter().collect();

        let result = check_row(&definitions, &[Value::from(1)]);

        assert_eq!(result, Err(TableError::TooFewValues { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_valid_row() {
        let columns = people();
        let definitions: Vec<&ColumnDefinition> = columns.iter().collect();

        assert_eq!(check_row(&definitions, &[Value::from("Alice"), Value::from(30)]), Ok(()));
        assert_eq!(check_row(&[], &[]), Ok(()));
    }
}
