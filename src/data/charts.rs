use super::model::{Column, Dataset};
use super::stats::{Histogram, density_curve, distinct_count, value_counts};

// ---------------------------------------------------------------------------
// Chart specifications – everything the plot layer needs, precomputed
// ---------------------------------------------------------------------------

/// Bar chart of value frequencies for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalChart {
    pub column: String,
    /// `(label, count)`, most frequent first.
    pub bars: Vec<(String, usize)>,
}

/// Histogram plus smoothed density for one numeric column.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericChart {
    pub column: String,
    pub histogram: Histogram,
    /// Density scaled to histogram counts; `None` when it cannot be estimated.
    pub density: Option<Vec<[f64; 2]>>,
}

/// A column can be drawn as a bar chart when it holds only scalars and has
/// at most `max_categories` distinct non-null values.
pub fn is_categorical_eligible(column: &Column, max_categories: usize) -> bool {
    column.values.iter().all(|v| v.is_scalar()) && distinct_count(&column.values) <= max_categories
}

pub fn categorical_charts(dataset: &Dataset, max_categories: usize) -> Vec<CategoricalChart> {
    dataset
        .columns
        .iter()
        .filter(|col| is_categorical_eligible(col, max_categories))
        .map(|col| CategoricalChart {
            column: col.name.clone(),
            bars: value_counts(&col.values)
                .into_iter()
                .map(|(v, n)| (v.to_string(), n))
                .collect(),
        })
        .collect()
}

/// One chart per integer / float column, whatever its cardinality.
pub fn numeric_charts(dataset: &Dataset) -> Vec<NumericChart> {
    dataset
        .columns
        .iter()
        .filter(|col| col.kind.is_numeric())
        .map(|col| {
            let values = col.numeric_values();
            let histogram = Histogram::auto(&values);
            let density = density_curve(&values, histogram.bin_width());
            NumericChart {
                column: col.name.clone(),
                histogram,
                density,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use pretty_assertions::assert_eq;

    fn many_ints(n: i64) -> Column {
        Column::new("id", (0..n).map(CellValue::Integer).collect())
    }

    #[test]
    fn high_cardinality_excluded_from_bars_but_still_numeric() {
        let ds = Dataset {
            columns: vec![many_ints(26)],
            row_count: 26,
        };
        assert!(categorical_charts(&ds, 25).is_empty());
        let numeric = numeric_charts(&ds);
        assert_eq!(numeric.len(), 1);
        assert_eq!(numeric[0].histogram.counts.iter().sum::<usize>(), 26);
    }

    #[test]
    fn exactly_max_categories_is_eligible() {
        let ds = Dataset {
            columns: vec![many_ints(25)],
            row_count: 25,
        };
        assert_eq!(categorical_charts(&ds, 25).len(), 1);
    }

    #[test]
    fn low_cardinality_numeric_column_is_plotted_twice() {
        let ds = Dataset {
            columns: vec![Column::new(
                "Rooms",
                vec![CellValue::Integer(2), CellValue::Integer(3), CellValue::Integer(2)],
            )],
            row_count: 3,
        };
        assert_eq!(
            categorical_charts(&ds, 25)[0].bars,
            vec![("2".to_string(), 2), ("3".to_string(), 1)]
        );
        assert_eq!(numeric_charts(&ds).len(), 1);
    }

    #[test]
    fn signed_zeros_share_one_bar() {
        let ds = Dataset {
            columns: vec![Column::new(
                "V",
                vec![CellValue::Integer(0), CellValue::Float(-0.0), CellValue::Float(0.5)],
            )],
            row_count: 3,
        };
        let charts = categorical_charts(&ds, 25);
        assert_eq!(
            charts[0].bars,
            vec![("0.0".to_string(), 2), ("0.5".to_string(), 1)]
        );
    }

    #[test]
    fn nested_values_are_not_categorical() {
        let ds = Dataset {
            columns: vec![Column::new(
                "Tags",
                vec![CellValue::Nested("[1]".into()), CellValue::Text("a".into())],
            )],
            row_count: 2,
        };
        assert!(categorical_charts(&ds, 25).is_empty());
        assert!(numeric_charts(&ds).is_empty());
    }

    #[test]
    fn all_null_column_is_an_empty_bar_chart() {
        let ds = Dataset {
            columns: vec![Column::new("Note", vec![CellValue::Null, CellValue::Null])],
            row_count: 2,
        };
        let charts = categorical_charts(&ds, 25);
        assert_eq!(charts.len(), 1);
        assert!(charts[0].bars.is_empty());
    }
}
