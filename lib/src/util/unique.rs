use std::collections::HashSet;

/// Drops repeated strings, keeping the first occurrence of each in order.
#[must_use]
pub fn unique_strings<I, S>(input: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = HashSet::new();
    input
        .into_iter()
        .map(Into::into)
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(&[], &[])]
    #[case(&["a"], &["a"])]
    #[case(&["a", "a", "a"], &["a"])]
    #[case(&["b", "a", "b", "c", "a"], &["b", "a", "c"])]
    #[case(
        &["ns1.example.com.", "ns2.example.com.", "ns1.example.com."],
        &["ns1.example.com.", "ns2.example.com."]
    )]
    fn keeps_first_occurrence(#[case] input: &[&str], #[case] should: &[&str]) {
        let got = unique_strings(input.iter().copied());
        assert_eq!(got, should);
    }

    #[test]
    fn is_case_sensitive() {
        let got = unique_strings(["A.example.", "a.example."]);
        assert_eq!(got, ["A.example.", "a.example."]);
    }
}
