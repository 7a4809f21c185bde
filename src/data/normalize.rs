use super::model::{Column, Dataset};

/// Turn a raw column label into its display form: trimmed, line breaks
/// removed, underscores as spaces, title-cased.
///
/// `" village_name\n"` → `"Village Name"`
pub fn normalize_column_name(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|&c| c != '\n' && c != '\r')
        .map(|c| if c == '_' { ' ' } else { c })
        .collect();
    title_case(cleaned.trim())
}

/// Python-style title case: a character following a cased character is
/// lower-cased, any other is upper-cased. Case mappings that expand to
/// several characters (`ß` → `SS`) are fed back through the same rule one
/// character at a time, so `ß` becomes `Ss` and the result is stable under a
/// second pass.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        let mapped: Vec<char> = if prev_cased {
            c.to_lowercase().collect()
        } else {
            c.to_uppercase().collect()
        };
        for m in mapped {
            let ch = if prev_cased { first_lower(m) } else { first_upper(m) };
            out.push(ch);
            prev_cased = is_cased(ch);
        }
    }
    out
}

fn is_cased(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase()
}

fn first_upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

fn first_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Relabel every column; order and values are untouched.
pub fn normalize(dataset: Dataset) -> Dataset {
    let columns = dataset
        .columns
        .into_iter()
        .map(|col| Column {
            name: normalize_column_name(&col.name),
            ..col
        })
        .collect();
    Dataset {
        columns,
        row_count: dataset.row_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn normalizes_labels() {
        assert_eq!(normalize_column_name("village_name"), "Village Name");
        assert_eq!(normalize_column_name("pop"), "Pop");
        assert_eq!(normalize_column_name("  total_\nHOUSEHOLDS\r "), "Total Households");
        assert_eq!(normalize_column_name("pop2x"), "Pop2X");
        assert_eq!(normalize_column_name("name_"), "Name");
        assert_eq!(normalize_column_name(""), "");
        assert_eq!(normalize_column_name("ßa"), "Ssa");
        assert_eq!(normalize_column_name("ﬁeld_name"), "Field Name");
        assert_eq!(normalize_column_name("日本x"), "日本X");
    }

    #[test]
    fn normalized_labels_are_clean() {
        for raw in ["_a_b_", "\n x \r", " many__under_scores ", "line\nbreak", "MiXeD cAsE"] {
            let n = normalize_column_name(raw);
            assert!(!n.contains('_'), "{n:?}");
            assert!(!n.contains('\n') && !n.contains('\r'), "{n:?}");
            assert_eq!(n, n.trim());
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["village_name", " a_\nb ", "école_primaire", "x1_y2", "name_", "ALL CAPS", "ßa", "ﬁeld", "日本x", "ŉ_straße"] {
            let once = normalize_column_name(raw);
            assert_eq!(normalize_column_name(&once), once);
        }
    }

    #[test]
    fn normalize_preserves_order_and_values() {
        let ds = Dataset {
            columns: vec![
                Column::new("village_name", vec![CellValue::Text("A".into())]),
                Column::new("pop", vec![CellValue::Integer(10)]),
            ],
            row_count: 1,
        };
        let out = normalize(ds.clone());
        assert_eq!(out.column_names(), vec!["Village Name", "Pop"]);
        assert_eq!(out.columns[0].values, ds.columns[0].values);
        assert_eq!(out.columns[1].kind, ds.columns[1].kind);
        assert_eq!(out.row_count, 1);
    }
}
