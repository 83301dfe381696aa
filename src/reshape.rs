//! Long-to-wide dataset pivot.
//!
//! Turns a long-format dataset (one observation per row) into a wide one
//! with a column per (value column, key label) pair, the layout spreadsheet
//! tools expect for side-by-side group comparison.

use thiserror::Error;

use crate::dataset::{Dataset, DatasetError};

/// Errors raised by [`long_to_wide`].
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// The key column or a requested value column is absent.
    #[error("column {column:?} does not exist in the dataset")]
    UnknownColumn { column: String },

    /// The dataset has no rows to pivot.
    #[error("dataset has no rows")]
    Empty,

    /// No value columns were requested.
    #[error("no value columns requested")]
    NoValueColumns,

    /// Output construction failed, e.g. two (value column, label) pairs
    /// collapsing to the same name after the space substitution.
    #[error(transparent)]
    Output(#[from] DatasetError),
}

/// Pivots `dataset` from long to wide format.
///
/// One output column is produced per requested value column and key label,
/// value-column-major, named `{value}_{label}` with spaces in the label
/// replaced by underscores. Each column carries its group's cells in
/// original row order with blank cells dropped; shorter columns are padded
/// with empty cells to the longest column's length. At least one value
/// column must be requested.
pub fn long_to_wide(
    dataset: &Dataset,
    key_column: &str,
    value_columns: &[String],
) -> Result<Dataset, ReshapeError> {
    if value_columns.is_empty() {
        return Err(ReshapeError::NoValueColumns);
    }
    let key_idx = dataset
        .column_index(key_column)
        .ok_or_else(|| ReshapeError::UnknownColumn {
            column: key_column.to_string(),
        })?;
    let mut value_idxs = Vec::with_capacity(value_columns.len());
    for column in value_columns {
        let idx = dataset
            .column_index(column)
            .ok_or_else(|| ReshapeError::UnknownColumn {
                column: column.clone(),
            })?;
        value_idxs.push(idx);
    }
    if dataset.is_empty() {
        return Err(ReshapeError::Empty);
    }

    let partition = dataset.partition_by(key_idx);
    let width = value_columns.len() * partition.labels.len();
    let mut columns = Vec::with_capacity(width);
    let mut series: Vec<Vec<String>> = Vec::with_capacity(width);
    for (column, &value_idx) in value_columns.iter().zip(&value_idxs) {
        for (label, members) in partition.labels.iter().zip(&partition.members) {
            columns.push(format!("{column}_{}", label.replace(' ', "_")));
            let cells: Vec<String> = members
                .iter()
                .map(|&row| dataset.rows()[row][value_idx].clone())
                .filter(|cell| !cell.is_empty())
                .collect();
            series.push(cells);
        }
    }

    let height = series.iter().map(Vec::len).max().unwrap_or(0);
    let mut rows = Vec::with_capacity(height);
    for i in 0..height {
        rows.push(
            series
                .iter()
                .map(|cells| cells.get(i).cloned().unwrap_or_default())
                .collect(),
        );
    }

    Ok(Dataset::new(columns, rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn long(rows: &[(&str, &str)]) -> Dataset {
        let rows = rows
            .iter()
            .map(|(group, score)| vec![(*group).to_string(), (*score).to_string()])
            .collect();
        Dataset::new(vec!["group".into(), "score".into()], rows).unwrap()
    }

    #[test]
    fn test_pivots_single_value_column_with_padding() {
        let ds = long(&[("a", "1"), ("b", "4"), ("a", "2"), ("b", "5"), ("a", "3")]);
        let wide = long_to_wide(&ds, "group", &["score".to_string()]).unwrap();

        assert_eq!(wide.columns(), ["score_a", "score_b"]);
        assert_eq!(
            wide.rows(),
            [
                vec!["1".to_string(), "4".to_string()],
                vec!["2".to_string(), "5".to_string()],
                vec!["3".to_string(), String::new()],
            ]
        );
    }

    #[test]
    fn test_value_column_major_layout() {
        let rows = vec![
            vec!["a".to_string(), "1".to_string(), "9".to_string()],
            vec!["b".to_string(), "2".to_string(), "8".to_string()],
        ];
        let ds = Dataset::new(vec!["group".into(), "x".into(), "y".into()], rows).unwrap();
        let wide = long_to_wide(&ds, "group", &["x".to_string(), "y".to_string()]).unwrap();

        assert_eq!(wide.columns(), ["x_a", "x_b", "y_a", "y_b"]);
        assert_eq!(wide.rows(), [vec!["1", "2", "9", "8"]]);
    }

    #[test]
    fn test_labels_keep_first_encounter_order() {
        let ds = long(&[("b", "9"), ("a", "1"), ("b", "8")]);
        let wide = long_to_wide(&ds, "group", &["score".to_string()]).unwrap();
        assert_eq!(wide.columns(), ["score_b", "score_a"]);
    }

    #[test]
    fn test_spaces_in_labels_become_underscores() {
        let ds = long(&[("control arm", "1"), ("treated", "2")]);
        let wide = long_to_wide(&ds, "group", &["score".to_string()]).unwrap();
        assert_eq!(wide.columns(), ["score_control_arm", "score_treated"]);
    }

    #[test]
    fn test_blank_cells_are_dropped() {
        let ds = long(&[("a", ""), ("a", "1"), ("b", "2")]);
        let wide = long_to_wide(&ds, "group", &["score".to_string()]).unwrap();
        assert_eq!(wide.rows(), [vec!["1", "2"]]);
    }

    #[test]
    fn test_unknown_columns_are_rejected() {
        let ds = long(&[("a", "1"), ("b", "2")]);

        let err = long_to_wide(&ds, "nope", &["score".to_string()]).unwrap_err();
        assert!(matches!(err, ReshapeError::UnknownColumn { column } if column == "nope"));

        let err = long_to_wide(&ds, "group", &["weight".to_string()]).unwrap_err();
        assert!(matches!(err, ReshapeError::UnknownColumn { column } if column == "weight"));
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let ds = Dataset::new(vec!["group".into(), "score".into()], Vec::new()).unwrap();
        let err = long_to_wide(&ds, "group", &["score".to_string()]).unwrap_err();
        assert!(matches!(err, ReshapeError::Empty));
    }

    #[test]
    fn test_empty_value_selection_is_rejected() {
        let ds = long(&[("a", "1"), ("b", "2")]);
        let err = long_to_wide(&ds, "group", &[]).unwrap_err();
        assert!(matches!(err, ReshapeError::NoValueColumns));
    }

    #[test]
    fn test_colliding_output_names_are_rejected() {
        let ds = long(&[("a b", "1"), ("a_b", "2")]);
        let err = long_to_wide(&ds, "group", &["score".to_string()]).unwrap_err();
        assert!(matches!(err, ReshapeError::Output(_)));
    }
}
