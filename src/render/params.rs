//! Ordered parameter maps and query-string encoding.
//!
//! Parameters keep insertion order so rendered URLs are reproducible.
//! Re-inserting an existing key replaces its value in place, which gives
//! last-write-wins semantics without moving the key.

use indexmap::IndexMap;

/// Workflow inputs and query parameters, in insertion order.
pub type Params = IndexMap<String, String>;

/// Build a `Params` map from borrowed key/value pairs.
pub fn params<'a, I>(pairs: I) -> Params
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Encode a single query component.
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ~`) pass through, space becomes
/// `+`, everything else is percent-encoded as UTF-8.
pub fn encode_query_component(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// Encode an ordered parameter map as `k1=v1&k2=v2`.
pub fn encode_query(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                encode_query_component(k),
                encode_query_component(v)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinsert_keeps_position_and_takes_last_value() {
        let mut p = params([("a", "1"), ("b", "2")]);
        p.insert("a".into(), "3".into());
        let keys: Vec<_> = p.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(p["a"], "3");
    }

    #[test]
    fn test_encode_space_as_plus() {
        assert_eq!(encode_query_component("run all tests"), "run+all+tests");
    }

    #[test]
    fn test_encode_reserved_characters() {
        assert_eq!(encode_query_component("a&b=c+d"), "a%26b%3Dc%2Bd");
        assert_eq!(
            encode_query_component("https://github.com/o/r/pull/1"),
            "https%3A%2F%2Fgithub.com%2Fo%2Fr%2Fpull%2F1"
        );
    }

    #[test]
    fn test_encode_unreserved_passthrough() {
        assert_eq!(encode_query_component("ci-v1.2_x~y"), "ci-v1.2_x~y");
    }

    #[test]
    fn test_encode_query_preserves_order() {
        let p = params([("test_type", "all"), ("from_pr", "7")]);
        assert_eq!(encode_query(&p), "test_type=all&from_pr=7");
    }

    #[test]
    fn test_encode_query_empty() {
        assert_eq!(encode_query(&Params::new()), "");
    }
}
