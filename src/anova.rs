//! One-way ANOVA engine.
//!
//! Pure computation: partitions a dataset by a group column, decomposes the
//! variance of a value column into between- and within-group sums of
//! squares, and evaluates the F test at the 5% significance level.

#![allow(clippy::cast_precision_loss)]

use serde::Serialize;
use thiserror::Error;

use crate::dataset::Dataset;
use crate::fdist;

/// Fixed significance level for the critical F value and the conclusion.
pub const ALPHA: f64 = 0.05;

/// Errors raised by [`compute`].
///
/// All are terminal for a request: the computation is deterministic, so a
/// retry cannot change the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnovaError {
    /// The named group or value column is absent from the dataset.
    #[error("column {column:?} does not exist in the dataset")]
    InvalidColumn { column: String },

    /// Fewer than two groups, or no within-group degrees of freedom left
    /// (the dataset has as many groups as rows).
    #[error(
        "insufficient data: {groups} group(s) over {rows} row(s); \
         need at least two groups and more rows than groups"
    )]
    InsufficientData { groups: usize, rows: usize },

    /// A cell in the value column is not numeric; nothing is coerced.
    #[error("row {row}, column {column:?}: {value:?} is not numeric")]
    InvalidData {
        row: usize,
        column: String,
        value: String,
    },

    /// The sums of squares exceed double precision range; the input
    /// magnitudes are too large for a meaningful result.
    #[error("sums of squares exceed double precision range; input magnitudes are too large")]
    Overflow,
}

/// Decision against the null hypothesis at [`ALPHA`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conclusion {
    /// p-value below the significance level: at least one group mean differs.
    RejectNull,
    /// p-value at or above the significance level.
    FailToRejectNull,
}

impl Conclusion {
    #[must_use]
    pub const fn is_significant(self) -> bool {
        matches!(self, Self::RejectNull)
    }
}

/// Immutable summary of a one-way ANOVA.
///
/// `sst` is derived as `ssb + ssw`, so the variance decomposition identity
/// holds by construction. `groups` lists the labels in first-encounter
/// order, the same order used while accumulating the sums of squares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaResult {
    /// Column the rows were grouped by.
    pub group_column: String,
    /// Numeric column under test.
    pub variable_column: String,
    /// Group labels in first-encounter order.
    pub groups: Vec<String>,
    /// Sum of squares between groups.
    pub ssb: f64,
    /// Sum of squares within groups.
    pub ssw: f64,
    /// Total sum of squares (`ssb + ssw`).
    pub sst: f64,
    /// Between-group degrees of freedom (`k - 1`).
    pub df_between: usize,
    /// Within-group degrees of freedom (`n - k`).
    pub df_within: usize,
    /// Mean square between groups (`ssb / df_between`).
    pub msb: f64,
    /// Mean square within groups (`ssw / df_within`).
    pub msw: f64,
    /// `msb / msw`; positive infinity when `msw` is zero.
    pub f_statistic: f64,
    /// Upper-tail probability of the F statistic; 0.0 when `msw` is zero.
    pub p_value: f64,
    /// F quantile at `1 - ALPHA` for the same degrees of freedom.
    pub f_critical: f64,
}

impl AnovaResult {
    /// Decision at the fixed significance level: reject the null hypothesis
    /// exactly when `p_value < ALPHA`.
    #[must_use]
    pub fn conclusion(&self) -> Conclusion {
        if self.p_value < ALPHA {
            Conclusion::RejectNull
        } else {
            Conclusion::FailToRejectNull
        }
    }
}

/// Runs a one-way ANOVA of `value_column` grouped by `group_column`.
///
/// Groups form in first-encounter order, and the overall mean is taken over
/// the pooled values rather than as a mean of group means, which keeps
/// `sst = ssb + ssw` exact when group sizes differ. The value cells must
/// parse as finite `f64` after trimming surrounding whitespace; `NaN` and
/// infinity spellings count as invalid data.
///
/// When every group's values are internally identical (`msw == 0.0`), the F
/// statistic is reported as positive infinity with a p-value of 0.0. Inputs
/// whose squared deviations overflow double precision fail with
/// [`AnovaError::Overflow`]. The engine never returns NaN.
pub fn compute(
    dataset: &Dataset,
    group_column: &str,
    value_column: &str,
) -> Result<AnovaResult, AnovaError> {
    let group_idx = dataset
        .column_index(group_column)
        .ok_or_else(|| AnovaError::InvalidColumn {
            column: group_column.to_string(),
        })?;
    let value_idx = dataset
        .column_index(value_column)
        .ok_or_else(|| AnovaError::InvalidColumn {
            column: value_column.to_string(),
        })?;

    let partition = dataset.partition_by(group_idx);
    let n = dataset.len();
    let k = partition.labels.len();
    if k < 2 || n == k {
        return Err(AnovaError::InsufficientData { groups: k, rows: n });
    }

    // `f64::from_str` accepts "NaN" and "inf" spellings; those are not data.
    let mut values = Vec::with_capacity(n);
    for (row, cells) in dataset.rows().iter().enumerate() {
        let cell = &cells[value_idx];
        let value = cell
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| AnovaError::InvalidData {
                row,
                column: value_column.to_string(),
                value: cell.clone(),
            })?;
        values.push(value);
    }

    // Pooled overall mean, not the mean of group means: the weighted SSB
    // formula requires it when group sizes differ.
    let overall_mean = values.iter().sum::<f64>() / n as f64;

    let mut ssb = 0.0;
    let mut ssw = 0.0;
    for members in &partition.members {
        let size = members.len() as f64;
        let group_mean = members.iter().map(|&row| values[row]).sum::<f64>() / size;
        ssb += size * (group_mean - overall_mean).powi(2);
        ssw += members
            .iter()
            .map(|&row| (values[row] - group_mean).powi(2))
            .sum::<f64>();
    }
    // Cells near 1e154 square past f64::MAX; an infinite sum would surface
    // downstream as `inf / inf = NaN`.
    if !ssb.is_finite() || !ssw.is_finite() {
        return Err(AnovaError::Overflow);
    }
    let sst = ssb + ssw;

    let df_between = k - 1;
    let df_within = n - k;
    let msb = ssb / df_between as f64;
    let msw = ssw / df_within as f64;

    let (f_statistic, p_value) = if msw == 0.0 {
        (f64::INFINITY, 0.0)
    } else {
        let f = msb / msw;
        (f, fdist::survival(f, df_between as f64, df_within as f64))
    };
    let f_critical = fdist::quantile(1.0 - ALPHA, df_between as f64, df_within as f64);

    Ok(AnovaResult {
        group_column: group_column.to_string(),
        variable_column: value_column.to_string(),
        groups: partition.labels,
        ssb,
        ssw,
        sst,
        df_between,
        df_within,
        msb,
        msw,
        f_statistic,
        p_value,
        f_critical,
    })
}
