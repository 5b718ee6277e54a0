// ============================================================
// Layer 4 — Dataset Summary
// ============================================================
// Descriptive statistics per column (count, mean, std, min, max),
// with month and day encoded to their numeric codes first.
//
// `std` is the sample standard deviation (n - 1 denominator),
// matching what a dataframe `describe()` reports.

use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::domain::observation::{LabeledObservation, FEATURE_ORDER, TARGET_COLUMN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name:  String,
    pub count: usize,
    pub mean:  f64,
    pub std:   f64,
    pub min:   f64,
    pub max:   f64,
}

impl ColumnSummary {
    fn from_values(name: &str, values: &[f64]) -> Self {
        let count = values.len();
        let mean  = if count > 0 {
            values.iter().sum::<f64>() / count as f64
        } else {
            f64::NAN
        };
        let std = if count > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (count - 1) as f64).sqrt()
        } else {
            f64::NAN
        };
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self { name: name.to_string(), count, mean, std, min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub rows:    usize,
    pub columns: Vec<ColumnSummary>,
}

impl DatasetSummary {
    /// Summarise every feature column plus the target.
    ///
    /// # Errors
    /// `UnknownCategory` if a row carries an invalid month/day token.
    pub fn describe(rows: &[LabeledObservation]) -> Result<Self> {
        let encoded: Vec<_> = rows
            .iter()
            .map(|r| r.observation.encode())
            .collect::<Result<_>>()?;

        let mut columns: Vec<ColumnSummary> = FEATURE_ORDER
            .iter()
            .enumerate()
            .map(|(col, name)| {
                let values: Vec<f64> = encoded.iter().map(|f| f[col] as f64).collect();
                ColumnSummary::from_values(name, &values)
            })
            .collect();

        let areas: Vec<f64> = rows.iter().map(|r| r.area).collect();
        columns.push(ColumnSummary::from_values(TARGET_COLUMN, &areas));

        Ok(Self { rows: rows.len(), columns })
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::Observation;

    fn row(month: &str, temp: f64, area: f64) -> LabeledObservation {
        LabeledObservation {
            observation: Observation {
                month: month.into(),
                day:   "sun".into(),
                ffmc:  90.0,
                dmc:   30.0,
                dc:    100.0,
                isi:   5.0,
                temp,
                rh:    40.0,
                wind:  4.0,
                rain:  0.0,
                x:     1.0,
                y:     2.0,
            },
            area,
        }
    }

    #[test]
    fn test_describe_statistics() {
        let rows = vec![row("jan", 10.0, 0.0), row("mar", 20.0, 2.0), row("dec", 30.0, 4.0)];
        let s = DatasetSummary::describe(&rows).unwrap();

        assert_eq!(s.rows, 3);
        assert_eq!(s.columns.len(), 13);

        let temp = s.column("temp").unwrap();
        assert_eq!(temp.count, 3);
        assert!((temp.mean - 20.0).abs() < 1e-6);
        assert!((temp.std - 10.0).abs() < 1e-6);
        assert_eq!(temp.min, 10.0);
        assert_eq!(temp.max, 30.0);

        let month = s.column("month").unwrap();
        assert_eq!(month.min, 1.0);
        assert_eq!(month.max, 12.0);

        let area = s.column("area").unwrap();
        assert!((area.mean - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_row_has_undefined_std() {
        let s = DatasetSummary::describe(&[row("jan", 10.0, 0.0)]).unwrap();
        assert!(s.column("temp").unwrap().std.is_nan());
    }

    #[test]
    fn test_unknown_token_fails() {
        assert!(DatasetSummary::describe(&[row("foo", 1.0, 0.0)]).is_err());
    }
}
