//! Query-string helpers.
//!
//! Handlers take the raw `(key, value)` pairs so that repeated keys such as
//! `?country=Mali&country=Niger` survive, and so that bad values produce the
//! same JSON `detail` error body as every other failure.

use crate::error::{AppError, Result};

pub type QueryPairs = Vec<(String, String)>;

/// First non-empty value for `key`, trimmed
pub fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.trim())
        .find(|v| !v.is_empty())
}

/// Every non-empty value for `key`, trimmed, in request order
pub fn all(pairs: &[(String, String)], key: &str) -> Vec<String> {
    pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Required non-empty value for `key`
pub fn required<'a>(pairs: &'a [(String, String)], key: &str) -> Result<&'a str> {
    first(pairs, key).ok_or_else(|| AppError::InvalidInput(format!("{} is required", key)))
}

/// Integer value for `key`, or `default` when absent
pub fn integer(pairs: &[(String, String)], key: &str, default: i64) -> Result<i64> {
    match first(pairs, key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::InvalidInput(format!("{} must be an integer", key))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> QueryPairs {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_and_all() {
        let query = pairs(&[
            ("country", "Mali"),
            ("offset", "5"),
            ("country", " Niger "),
            ("country", ""),
        ]);

        assert_eq!(first(&query, "country"), Some("Mali"));
        assert_eq!(all(&query, "country"), vec!["Mali", "Niger"]);
        assert_eq!(first(&query, "page_size"), None);
        assert!(all(&query, "page_size").is_empty());
    }

    #[test]
    fn test_required() {
        let query = pairs(&[("admin1", "Gao"), ("country", "  ")]);

        assert_eq!(required(&query, "admin1").unwrap(), "Gao");
        assert!(matches!(
            required(&query, "country"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_integer() {
        let query = pairs(&[("offset", "20"), ("page_size", "ten")]);

        assert_eq!(integer(&query, "offset", 0).unwrap(), 20);
        assert_eq!(integer(&query, "missing", 7).unwrap(), 7);
        assert!(matches!(
            integer(&query, "page_size", 20),
            Err(AppError::InvalidInput(_))
        ));
    }
}
