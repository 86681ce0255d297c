//! Pulls a JSON payload out of free-form model output.
//!
//! Models asked for JSON still wrap it in markdown fences or surround it
//! with prose. The cleanup order is: fenced block first, then the first
//! balanced object or array, then the trimmed text as-is.

use serde::de::DeserializeOwned;

/// Error parsing model output as JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("model output is not valid JSON: {reason}")]
pub struct JsonExtractError {
    pub reason: String,
}

/// Returns the most likely JSON fragment in `response`.
pub fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    if let Some(block) = extract_from_code_block(trimmed) {
        return block;
    }

    let obj_start = trimmed.find('{');
    let arr_start = trimmed.find('[');

    let (start, open, close) = match (obj_start, arr_start) {
        (Some(o), Some(a)) if a < o => (a, '[', ']'),
        (Some(o), _) => (o, '{', '}'),
        (None, Some(a)) => (a, '[', ']'),
        (None, None) => return trimmed,
    };

    extract_balanced(trimmed, start, open, close).unwrap_or(trimmed)
}

/// Cleans `response` and deserializes it into `T`.
pub fn parse_json<T: DeserializeOwned>(response: &str) -> Result<T, JsonExtractError> {
    serde_json::from_str(extract_json(response)).map_err(|e| JsonExtractError {
        reason: e.to_string(),
    })
}

fn extract_from_code_block(s: &str) -> Option<&str> {
    let fence = s.find("```")?;
    let after_fence = &s[fence + 3..];
    // Skip the language tag, if any, up to the end of the line.
    let body_start = after_fence.find('\n').map(|i| i + 1)?;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    let content = body[..end].trim();
    (!content.is_empty()).then_some(content)
}

fn extract_balanced(s: &str, start: usize, open: char, close: char) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            c if c == open => depth += 1,
            c if c == close => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    return Some(&s[start..end]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Draft {
        city: String,
    }

    mod extract_json {
        use super::*;

        #[test]
        fn strips_json_fence() {
            let raw = "```json\n{\"city\": \"Pune\"}\n```";
            assert_eq!(extract_json(raw), "{\"city\": \"Pune\"}");
        }

        #[test]
        fn strips_bare_fence_with_prose() {
            let raw = "Sure! Here it is:\n```\n{\"a\": 1}\n```\nAnything else?";
            assert_eq!(extract_json(raw), "{\"a\": 1}");
        }

        #[test]
        fn finds_object_in_prose() {
            let raw = "The filter is {\"a\": {\"b\": 2}} as requested.";
            assert_eq!(extract_json(raw), "{\"a\": {\"b\": 2}}");
        }

        #[test]
        fn ignores_braces_inside_strings() {
            let raw = "x {\"note\": \"use } carefully\"} y";
            assert_eq!(extract_json(raw), "{\"note\": \"use } carefully\"}");
        }

        #[test]
        fn prefers_array_when_it_comes_first() {
            assert_eq!(extract_json("[1, {\"a\": 2}]"), "[1, {\"a\": 2}]");
        }

        #[test]
        fn handles_multibyte_text_before_json() {
            let raw = "₹ budget → {\"max\": 5}";
            assert_eq!(extract_json(raw), "{\"max\": 5}");
        }

        #[test]
        fn returns_trimmed_text_without_json() {
            assert_eq!(extract_json("  no json here "), "no json here");
        }
    }

    mod parse_json {
        use super::*;

        #[test]
        fn parses_fenced_payload() {
            let draft: Draft = parse_json("```json\n{\"city\": \"Surat\"}\n```").unwrap();
            assert_eq!(draft.city, "Surat");
        }

        #[test]
        fn unbalanced_payload_is_an_error() {
            let err = parse_json::<Draft>("{\"city\": \"Surat\"").unwrap_err();
            assert!(!err.reason.is_empty());
        }

        #[test]
        fn prose_only_is_an_error() {
            assert!(parse_json::<Draft>("I could not understand that").is_err());
        }
    }
}
