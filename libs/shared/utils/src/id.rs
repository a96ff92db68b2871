/// Generates the next prefixed identifier, e.g. `PH1`, `PH2`, `MED7`.
///
/// Looks at every existing ID that starts with `prefix`, parses the remainder as
/// an integer and returns `prefix` followed by the largest value plus one.
/// Suffixes that are not integers are skipped, so `{"PHx"}` yields `PH1`, and
/// so are suffixes with no successor (`i64::MAX`).
///
/// The scan is only collision-free when no other writer can insert between the
/// scan and the insert; run it inside `Table::insert_with`.
pub fn generate_id<'a, I>(existing_ids: I, prefix: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let next = existing_ids
        .into_iter()
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<i64>().ok())
        .filter_map(|n| n.checked_add(1))
        .fold(1, i64::max);

    format!("{}{}", prefix, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_id_for_empty_set() {
        assert_eq!(generate_id(Vec::<&str>::new(), "PH"), "PH1");
    }

    #[test]
    fn test_next_after_gaps() {
        assert_eq!(generate_id(["PH1", "PH2", "PH5"], "PH"), "PH6");
    }

    #[test]
    fn test_malformed_suffixes_are_skipped() {
        assert_eq!(generate_id(["PHx"], "PH"), "PH1");
        assert_eq!(generate_id(["PH", "PH3", "PH-9", "PHME12"], "PH"), "PH4");
    }

    #[test]
    fn test_suffix_at_integer_limit_is_skipped() {
        assert_eq!(generate_id(["DR9223372036854775807"], "DR"), "DR1");
        assert_eq!(generate_id(["DR4", "DR9223372036854775807"], "DR"), "DR5");
        assert_eq!(
            generate_id(["DR9223372036854775806"], "DR"),
            "DR9223372036854775807"
        );
    }

    #[test]
    fn test_other_prefixes_ignored() {
        assert_eq!(generate_id(["MED4", "M2", "M10"], "M"), "M11");
        assert_eq!(generate_id(["M2", "M10"], "MED"), "MED1");
    }
}
