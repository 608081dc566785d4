//! Deterministic entity labels derived from index keys.

use tablo_data::Index;

/// Produce one label per index entry, or `None` when no base name is given.
///
/// Scalar keys render as `base[key]`, composite keys as `base[k1,k2]`. The
/// rendering is a display convention, not a parser-safe encoding; key text
/// is not quoted or escaped. Duplicate labels are not rejected here; the
/// model sink surfaces them at creation.
pub fn entity_labels(index: &Index, base: Option<&str>) -> Option<Vec<String>> {
    let base = base?;
    Some(index.iter().map(|key| format!("{base}[{key}]")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablo_data::Key;

    #[test]
    fn test_scalar_labels() {
        let index = Index::new([0i64, 2, 3]);
        assert_eq!(
            entity_labels(&index, Some("x")),
            Some(vec![
                "x[0]".to_string(),
                "x[2]".to_string(),
                "x[3]".to_string()
            ])
        );
    }

    #[test]
    fn test_composite_labels() {
        let index = Index::new([
            Key::composite([Key::Int(0), Key::from("a")]),
            Key::composite([Key::Int(1), Key::from("b")]),
        ]);
        assert_eq!(
            entity_labels(&index, Some("z")),
            Some(vec!["z[0,a]".to_string(), "z[1,b]".to_string()])
        );
    }

    #[test]
    fn test_no_base_name_means_no_labels() {
        let index = Index::range(4);
        assert_eq!(entity_labels(&index, None), None);
    }

    #[test]
    fn test_empty_index_yields_empty_labels() {
        let index = Index::range(0);
        assert_eq!(entity_labels(&index, Some("x")), Some(Vec::new()));
    }

    #[test]
    fn test_duplicate_keys_pass_through() {
        let index = Index::new([1i64, 1]);
        assert_eq!(
            entity_labels(&index, Some("c")),
            Some(vec!["c[1]".to_string(), "c[1]".to_string()])
        );
    }
}
