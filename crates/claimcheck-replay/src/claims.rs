//! Splitting raw user input into individual claims.
//!
//! Double-quoted segments are claims in their own right and may contain
//! commas. Text outside quotes is split on commas. Claims keep the order in
//! which they appear in the input; segments that trim to nothing are dropped.
//!
//! ```text
//! "A is true", B is false   ->  ["A is true", "B is false"]
//! A, B, C                   ->  ["A", "B", "C"]
//! ```

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref QUOTED: Regex = Regex::new(r#""([^"]+)""#).expect("quoted-claim pattern is valid");
}

/// Parse `input` into claims.
pub fn parse_claims(input: &str) -> Vec<String> {
    let mut claims = Vec::new();
    let mut cursor = 0;

    for caps in QUOTED.captures_iter(input) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_unquoted(&input[cursor..whole.start()], &mut claims);
        push_claim(inner.as_str(), &mut claims);
        cursor = whole.end();
    }
    push_unquoted(&input[cursor..], &mut claims);

    claims
}

fn push_unquoted(text: &str, claims: &mut Vec<String>) {
    for segment in text.split(',') {
        // A lone or empty pair of quotes never forms a claim.
        push_claim(segment.trim().trim_matches('"'), claims);
    }
}

fn push_claim(text: &str, claims: &mut Vec<String>) {
    let text = text.trim();
    if !text.is_empty() {
        claims.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::parse_claims;

    #[test]
    fn test_quoted_and_bare_claims() {
        assert_eq!(
            parse_claims(r#""A is true", B is false"#),
            vec!["A is true", "B is false"]
        );
    }

    #[test]
    fn test_comma_separated() {
        assert_eq!(parse_claims("A, B, C"), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_whitespace_segments_dropped() {
        assert_eq!(parse_claims("A, ,  , B,"), vec!["A", "B"]);
        assert!(parse_claims("  ,  ").is_empty());
        assert!(parse_claims("").is_empty());
    }

    #[test]
    fn test_quoted_claims_keep_commas() {
        assert_eq!(
            parse_claims(r#""Paris, France is a city", "2+2=4""#),
            vec!["Paris, France is a city", "2+2=4"]
        );
    }

    #[test]
    fn test_order_of_appearance() {
        assert_eq!(
            parse_claims(r#"first, "second, quoted", third"#),
            vec!["first", "second, quoted", "third"]
        );
    }

    #[test]
    fn test_quoted_segments_trimmed() {
        assert_eq!(parse_claims(r#""  padded  ""#), vec!["padded"]);
        assert!(parse_claims(r#""   ""#).is_empty());
    }

    #[test]
    fn test_stray_quotes_ignored() {
        assert_eq!(parse_claims(r#""", A"#), vec!["A"]);
        assert_eq!(parse_claims(r#"A, "unterminated"#), vec!["A", "unterminated"]);
    }
}
