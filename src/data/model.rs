use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as it comes out of a JSON record.
/// Used as a hash key when counting values, so `PartialEq` and `Hash` must
/// agree: floats compare by bit pattern with `-0.0` folded into `0.0`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    /// Compact JSON text of an array or object cell.
    Nested(String),
}

/// Bits of `f` with both zeros mapped to `+0.0`.
fn float_key(f: f64) -> u64 {
    if f == 0.0 { 0.0f64.to_bits() } else { f.to_bits() }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        use CellValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Float(a), Float(b)) => float_key(*a) == float_key(*b),
            (Text(a), Text(b)) | (Nested(a), Nested(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) | CellValue::Nested(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => float_key(*f).hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) | CellValue::Nested(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Scalars are everything a flat record can hold: text, numbers,
    /// booleans and nulls.
    pub fn is_scalar(&self) -> bool {
        !matches!(self, CellValue::Nested(_))
    }

    /// Interpret the value as an `f64` for histogramming.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnKind – storage type inferred once at load time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Every value is an integer and nothing is missing.
    Integer,
    /// Every non-null value is a number, and either one of them is a float
    /// or the column has gaps (integers are promoted to floats).
    Float,
    Boolean,
    Text,
    /// Values from more than one family, or any nested value.
    Mixed,
    /// No non-null values at all.
    Empty,
}

impl ColumnKind {
    /// Infer the kind from a column's raw values.
    pub fn infer(values: &[CellValue]) -> Self {
        let mut has_null = false;
        let mut has_int = false;
        let mut has_float = false;
        let mut has_bool = false;
        let mut has_text = false;

        for v in values {
            match v {
                CellValue::Null => has_null = true,
                CellValue::Integer(_) => has_int = true,
                CellValue::Float(_) => has_float = true,
                CellValue::Bool(_) => has_bool = true,
                CellValue::Text(_) => has_text = true,
                CellValue::Nested(_) => return ColumnKind::Mixed,
            }
        }

        let numeric = has_int || has_float;
        let families = [numeric, has_bool, has_text].iter().filter(|&&f| f).count();
        match families {
            0 => ColumnKind::Empty,
            1 if numeric => {
                if has_float || has_null {
                    ColumnKind::Float
                } else {
                    ColumnKind::Integer
                }
            }
            1 if has_bool => ColumnKind::Boolean,
            1 => ColumnKind::Text,
            _ => ColumnKind::Mixed,
        }
    }

    /// 64-bit integer or floating point storage.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnKind::Integer => "int64",
            ColumnKind::Float => "float64",
            ColumnKind::Boolean => "bool",
            ColumnKind::Text => "text",
            ColumnKind::Mixed => "mixed",
            ColumnKind::Empty => "empty",
        }
    }
}

// ---------------------------------------------------------------------------
// Column / Dataset
// ---------------------------------------------------------------------------

/// One named column with its values across every row.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<CellValue>,
}

impl Column {
    /// Build a column, inferring its kind and promoting integers when the
    /// column is stored as floats.
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        let kind = ColumnKind::infer(&values);
        let values = if kind == ColumnKind::Float {
            values
                .into_iter()
                .map(|v| match v {
                    CellValue::Integer(i) => CellValue::Float(i as f64),
                    other => other,
                })
                .collect()
        } else {
            values
        };
        Column {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Number of null cells.
    pub fn missing(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Non-null numeric values, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(CellValue::as_f64).collect()
    }
}

/// The full table loaded from one dataset file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    /// Columns in first-seen order.
    pub columns: Vec<Column>,
    pub row_count: usize,
}

impl Dataset {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Cell at (`row`, `col`), `Null` when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const NULL: &CellValue = &CellValue::Null;
        self.columns
            .get(col)
            .and_then(|c| c.values.get(row))
            .unwrap_or(NULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_with_gaps_are_promoted_to_float() {
        let col = Column::new(
            "pop",
            vec![CellValue::Integer(10), CellValue::Null, CellValue::Integer(15)],
        );
        assert_eq!(col.kind, ColumnKind::Float);
        assert_eq!(col.values[0], CellValue::Float(10.0));
        assert_eq!(col.missing(), 1);
        assert_eq!(col.numeric_values(), vec![10.0, 15.0]);
    }

    #[test]
    fn infers_kinds() {
        use CellValue::*;
        assert_eq!(ColumnKind::infer(&[Integer(1), Integer(2)]), ColumnKind::Integer);
        assert_eq!(ColumnKind::infer(&[Integer(1), Float(2.5)]), ColumnKind::Float);
        assert_eq!(ColumnKind::infer(&[Bool(true), Null]), ColumnKind::Boolean);
        assert_eq!(ColumnKind::infer(&[Text("a".into())]), ColumnKind::Text);
        assert_eq!(ColumnKind::infer(&[Text("a".into()), Integer(1)]), ColumnKind::Mixed);
        assert_eq!(ColumnKind::infer(&[Bool(true), Integer(1)]), ColumnKind::Mixed);
        assert_eq!(ColumnKind::infer(&[Nested("[1]".into())]), ColumnKind::Mixed);
        assert_eq!(ColumnKind::infer(&[Null, Null]), ColumnKind::Empty);
        assert_eq!(ColumnKind::infer(&[]), ColumnKind::Empty);
    }

    #[test]
    fn signed_zeros_are_one_value() {
        use std::collections::HashSet;
        assert_eq!(CellValue::Float(0.0), CellValue::Float(-0.0));
        let set: HashSet<CellValue> = [CellValue::Float(0.0), CellValue::Float(-0.0)].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_ne!(CellValue::Integer(1), CellValue::Float(1.0));
    }

    #[test]
    fn display_matches_export_formatting() {
        assert_eq!(CellValue::Float(15.0).to_string(), "15.0");
        assert_eq!(CellValue::Bool(false).to_string(), "False");
        assert_eq!(CellValue::Null.to_string(), "");
    }

    #[test]
    fn cell_out_of_range_is_null() {
        let ds = Dataset {
            columns: vec![Column::new("a", vec![CellValue::Integer(1)])],
            row_count: 1,
        };
        assert_eq!(ds.cell(0, 0), &CellValue::Integer(1));
        assert!(ds.cell(5, 0).is_null());
        assert!(ds.cell(0, 3).is_null());
    }
}
