use std::collections::HashMap;

use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// The three headline numbers shown above the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub rows: usize,
    pub columns: usize,
    /// Null or absent cells across the whole table.
    pub missing: usize,
}

impl Summary {
    pub fn of(dataset: &Dataset) -> Self {
        Summary {
            rows: dataset.row_count,
            columns: dataset.columns.len(),
            missing: dataset.columns.iter().map(|c| c.missing()).sum(),
        }
    }
}

// ---------------------------------------------------------------------------
// Frequency counts
// ---------------------------------------------------------------------------

/// Distinct non-null values with their counts, most frequent first.
/// Equal counts keep the order in which the values were first seen.
pub fn value_counts(values: &[CellValue]) -> Vec<(CellValue, usize)> {
    let mut index: HashMap<&CellValue, usize> = HashMap::new();
    let mut counts: Vec<(CellValue, usize)> = Vec::new();

    for v in values.iter().filter(|v| !v.is_null()) {
        match index.get(v) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(v, counts.len());
                counts.push((v.clone(), 1));
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Number of distinct non-null values.
pub fn distinct_count(values: &[CellValue]) -> usize {
    values
        .iter()
        .filter(|v| !v.is_null())
        .collect::<std::collections::HashSet<_>>()
        .len()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Upper bound on bins so a pathological spread cannot explode the chart.
const MAX_BINS: usize = 10_000;

/// Equal-width bins: `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin values using the "auto" rule: the narrower of the
    /// Freedman–Diaconis and Sturges widths, Sturges alone when the
    /// interquartile range is zero.
    pub fn auto(values: &[f64]) -> Self {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return Histogram::default();
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len() as f64;
        let (mut lo, mut hi) = (sorted[0], sorted[sorted.len() - 1]);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let range = hi - lo;

        let sturges = (sorted[sorted.len() - 1] - sorted[0]) / (n.log2() + 1.0);
        let iqr = percentile(&sorted, 0.75) - percentile(&sorted, 0.25);
        let fd = 2.0 * iqr * n.powf(-1.0 / 3.0);
        let width = if fd > 0.0 { fd.min(sturges) } else { sturges };

        let n_bins = if width > 0.0 {
            ((range / width).ceil() as usize).clamp(1, MAX_BINS)
        } else {
            1
        };

        let step = range / n_bins as f64;
        let edges: Vec<f64> = (0..=n_bins).map(|i| lo + step * i as f64).collect();
        let mut counts = vec![0usize; n_bins];
        for &v in &sorted {
            let idx = (((v - lo) / range) * n_bins as f64).floor() as usize;
            counts[idx.min(n_bins - 1)] += 1;
        }

        Histogram { edges, counts }
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [a, b, ..] => b - a,
            _ => 0.0,
        }
    }

    /// `(left, right, count)` per bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| (w[0], w[1], c))
    }
}

/// Linear-interpolated percentile of already sorted data, `q` in `[0, 1]`.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let below = pos.floor() as usize;
    let above = pos.ceil() as usize;
    let frac = pos - below as f64;
    sorted[below] + (sorted[above] - sorted[below]) * frac
}

// ---------------------------------------------------------------------------
// Kernel density estimate
// ---------------------------------------------------------------------------

const DENSITY_GRID: usize = 200;

/// Gaussian KDE (Scott's bandwidth) over the data range, scaled so it sits
/// on top of a count histogram with bins of `bin_width`.
///
/// Returns `None` for fewer than two values or zero variance.
pub fn density_curve(values: &[f64], bin_width: f64) -> Option<Vec<[f64; 2]>> {
    let data: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if data.len() < 2 {
        return None;
    }
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let var = data.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std = var.sqrt();
    if std <= 0.0 || !std.is_finite() {
        return None;
    }

    let bandwidth = std * n.powf(-0.2);
    let lo = data.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let step = (hi - lo) / (DENSITY_GRID - 1) as f64;
    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    let scale = n * bin_width;

    let curve = (0..DENSITY_GRID)
        .map(|i| {
            let x = lo + step * i as f64;
            let density: f64 = data
                .iter()
                .map(|&xi| (-0.5 * ((x - xi) / bandwidth).powi(2)).exp())
                .sum::<f64>()
                * norm;
            [x, density * scale]
        })
        .collect();
    Some(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn summary_counts_shape_and_gaps() {
        let ds = Dataset {
            columns: vec![
                Column::new("a", vec![text("x"), CellValue::Null, text("y")]),
                Column::new("b", vec![CellValue::Null, CellValue::Null, CellValue::Integer(3)]),
            ],
            row_count: 3,
        };
        assert_eq!(
            Summary::of(&ds),
            Summary {
                rows: 3,
                columns: 2,
                missing: 3
            }
        );
        assert_eq!(Summary::of(&Dataset::default()), Summary::default());
    }

    #[test]
    fn value_counts_descending_with_first_seen_ties() {
        let values = vec![text("C"), text("A"), CellValue::Null, text("B"), text("A"), text("B"), text("D")];
        assert_eq!(
            value_counts(&values),
            vec![(text("A"), 2), (text("B"), 2), (text("C"), 1), (text("D"), 1)]
        );
        assert_eq!(distinct_count(&values), 4);
    }

    #[test]
    fn mixed_families_stay_distinct() {
        let values = vec![CellValue::Integer(1), CellValue::Float(1.0), CellValue::Bool(true)];
        assert_eq!(distinct_count(&values), 3);
        assert_eq!(value_counts(&values).len(), 3);
    }

    #[test]
    fn histogram_covers_every_value() {
        let values = [10.0, 15.0, 20.0];
        let h = Histogram::auto(&values);
        assert_eq!(h.counts.iter().sum::<usize>(), 3);
        assert_eq!(h.edges.len(), h.counts.len() + 1);
        assert_eq!(h.edges[0], 10.0);
        assert!((h.edges[h.edges.len() - 1] - 20.0).abs() < 1e-9);
    }

    #[test]
    fn histogram_single_value_gets_unit_bin() {
        let h = Histogram::auto(&[4.0, 4.0]);
        assert_eq!(h.edges, vec![3.5, 4.5]);
        assert_eq!(h.counts, vec![2]);
        assert_eq!(h.bin_width(), 1.0);
    }

    #[test]
    fn histogram_empty_input() {
        assert!(Histogram::auto(&[]).is_empty());
        assert!(Histogram::auto(&[f64::NAN]).is_empty());
    }

    #[test]
    fn density_curve_scaled_to_counts() {
        let values: Vec<f64> = (0..100).map(|i| (i % 10) as f64).collect();
        let h = Histogram::auto(&values);
        let curve = density_curve(&values, h.bin_width()).unwrap();
        assert_eq!(curve.len(), 200);
        assert_eq!(curve[0][0], 0.0);
        assert!((curve[199][0] - 9.0).abs() < 1e-9);

        // Trapezoid area approximates n * bin width (minus the tails cut at the range).
        let area: f64 = curve
            .windows(2)
            .map(|w| (w[1][0] - w[0][0]) * (w[0][1] + w[1][1]) / 2.0)
            .sum();
        let expected = 100.0 * h.bin_width();
        assert!(area > 0.7 * expected && area <= expected, "{area} vs {expected}");
    }

    #[test]
    fn density_curve_needs_spread() {
        assert!(density_curve(&[1.0], 1.0).is_none());
        assert!(density_curve(&[2.0, 2.0, 2.0], 1.0).is_none());
    }
}
