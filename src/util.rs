//! Small shared helpers: slugs, ids, timestamps.

use chrono::Utc;

/// Convert a display name to a URL-safe kebab-case slug.
///
/// Example: "Acme Corp" → "acme-corp"
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Fresh record id such as `ld-3f9a1c2e`.
pub fn new_record_id(prefix: &str) -> String {
    let simple = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{}", prefix, &simple[..8])
}

/// Today's date as `YYYY-MM-DD`, the format list screens display.
pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Acme Corp"), "acme-corp");
    }

    #[test]
    fn test_slugify_special_chars() {
        assert_eq!(slugify("Umbrella Health — East"), "umbrella-health-east");
    }

    #[test]
    fn test_new_record_id_shape() {
        let a = new_record_id("ld");
        let b = new_record_id("ld");
        assert!(a.starts_with("ld-"));
        assert_eq!(a.len(), 11);
        assert_ne!(a, b);
    }

    #[test]
    fn test_today_parses_as_date() {
        assert!(crate::view::parse_date(&today()).is_some());
    }
}
