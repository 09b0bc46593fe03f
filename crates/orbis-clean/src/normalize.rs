//! Column name normalization.
//!
//! Raw labels are lowercased, every run of characters other than ASCII
//! letters and digits becomes a single `_`, and leading or trailing `_` are dropped. Names that
//! collide after canonicalization receive `_2`, `_3`, ... in order of first
//! appearance.

use std::collections::HashSet;

use orbis_model::ColumnDescriptor;

/// Canonical name used when a label has no ASCII letters or digits.
pub const FALLBACK_NAME: &str = "column";

/// Canonicalizes one raw label without collision handling.
///
/// ```
/// use orbis_clean::canonicalize;
///
/// assert_eq!(canonicalize("  Tons (2019) "), "tons_2019");
/// assert_eq!(canonicalize("A--B"), "a_b");
/// assert_eq!(canonicalize("%%"), "column");
/// ```
pub fn canonicalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    if out.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        out
    }
}

/// Maps raw column labels to unique canonical names, preserving order.
///
/// A suffixed name is itself reserved, so inputs such as
/// `["a_b", "A B", "a_b_2"]` still produce distinct names.
pub fn normalize_columns<S: AsRef<str>>(raw_names: &[S]) -> Vec<ColumnDescriptor> {
    let mut taken: HashSet<String> = HashSet::with_capacity(raw_names.len());
    let mut descriptors = Vec::with_capacity(raw_names.len());

    for raw in raw_names {
        let raw = raw.as_ref();
        let base = canonicalize(raw);
        let canonical = if taken.contains(&base) {
            (2usize..)
                .map(|n| format!("{base}_{n}"))
                .find(|candidate| !taken.contains(candidate))
                .unwrap_or_default()
        } else {
            base
        };
        if canonical != raw {
            tracing::debug!(raw = raw, canonical = %canonical, "renamed column");
        }
        taken.insert(canonical.clone());
        descriptors.push(ColumnDescriptor {
            raw_name: raw.to_string(),
            canonical_name: canonical,
        });
    }

    descriptors
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn canonical_names(raw: &[&str]) -> Vec<String> {
        normalize_columns(raw)
            .into_iter()
            .map(|d| d.canonical_name)
            .collect()
    }

    #[test]
    fn collisions_get_suffixes_in_order() {
        assert_eq!(canonical_names(&["A B", "a_b"]), vec!["a_b", "a_b_2"]);
        assert_eq!(
            canonical_names(&["x", "X", " x ", "x!"]),
            vec!["x", "x_2", "x_3", "x_4"]
        );
    }

    #[test]
    fn suffixed_names_are_reserved() {
        assert_eq!(
            canonical_names(&["a_b", "A B", "a_b_2"]),
            vec!["a_b", "a_b_2", "a_b_2_2"]
        );
    }

    #[test]
    fn empty_labels_fall_back() {
        assert_eq!(canonical_names(&["", "__", "?"]), vec!["column", "column_2", "column_3"]);
    }

    #[test]
    fn canonical_set_is_unchanged() {
        let names = ["origin", "dest_state", "tons_2019"];
        assert_eq!(canonical_names(&names), names);
    }

    #[test]
    fn non_ascii_letters_become_separators() {
        assert_eq!(canonicalize("Región Origen"), "regi_n_origen");
        assert_eq!(canonicalize("Größe"), "gr_e");
    }

    proptest! {
        #[test]
        fn output_has_no_duplicates(raw in prop::collection::vec("[ A-Za-z0-9_#-]{0,6}", 0..12)) {
            let names: Vec<String> = normalize_columns(&raw)
                .into_iter()
                .map(|d| d.canonical_name)
                .collect();
            let unique: HashSet<&String> = names.iter().collect();
            prop_assert_eq!(unique.len(), names.len());
        }

        #[test]
        fn normalization_is_idempotent(raw in prop::collection::vec("[ A-Za-z0-9_.]{0,6}", 0..12)) {
            let once: Vec<String> = normalize_columns(&raw)
                .into_iter()
                .map(|d| d.canonical_name)
                .collect();
            let twice: Vec<String> = normalize_columns(&once)
                .into_iter()
                .map(|d| d.canonical_name)
                .collect();
            prop_assert_eq!(once, twice);
        }
    }
}
