//! Price extraction from dictated text

use std::sync::OnceLock;

use regex::Regex;

static NUMBER: OnceLock<Regex> = OnceLock::new();

fn number_regex() -> &'static Regex {
    NUMBER.get_or_init(|| Regex::new(r"[-+]?\d*\.\d+|\d+").expect("price pattern compiles"))
}

/// First number in `text`, as written
pub fn extract_price(text: &str) -> Option<String> {
    number_regex().find(text).map(|m| m.as_str().to_string())
}

/// Message shown when a transcript holds no number
pub fn no_price_message(text: &str) -> String {
    format!("No price detected in: '{}'", text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_number() {
        assert_eq!(extract_price("twelve fifty is 12.50").as_deref(), Some("12.50"));
        assert_eq!(extract_price("it cost 40 dollars and 3 cents").as_deref(), Some("40"));
        assert_eq!(extract_price(".75 for gum").as_deref(), Some(".75"));
        assert_eq!(extract_price("refund -3.5").as_deref(), Some("-3.5"));
    }

    #[test]
    fn test_no_number() {
        assert_eq!(extract_price("about a tenner"), None);
        assert_eq!(
            no_price_message("about a tenner"),
            "No price detected in: 'about a tenner'"
        );
    }
}
