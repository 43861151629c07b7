//! Turning the vision model's reply text into item rows.

use fridgescan_schema::{DetectedEntry, DetectionReply};
use serde::Serialize;
use serde_json::Value;

/// Quantity used when the model gives none, or something unusable.
pub const DEFAULT_QUANTITY: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedItem {
    pub name: String,
    pub quantity: i64,
}

/// Parses a reply into items.
///
/// Accepts a bare array or `{"items": [...]}`, optionally wrapped in a
/// markdown code fence. Entries without a usable name are skipped.
pub fn parse_vision_reply(text: &str) -> Result<Vec<DetectedItem>, serde_json::Error> {
    let payload = strip_code_fence(text);
    let reply: DetectionReply = serde_json::from_str(payload)?;

    Ok(reply
        .into_entries()
        .iter()
        .filter_map(detected_item)
        .collect())
}

fn detected_item(entry: &DetectedEntry) -> Option<DetectedItem> {
    let name = entry.name()?;
    Some(DetectedItem {
        name: name.to_string(),
        quantity: coerce_quantity(entry.quantity.as_ref()),
    })
}

/// Returns the body of the first fenced block, or the trimmed text if unfenced.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(open) = trimmed.find("```") else {
        return trimmed;
    };

    let after_open = &trimmed[open + 3..];
    // Skip the info string (`json`, `JSON`, ...) up to the end of its line.
    // On a single-line fence only its leading word is the info string.
    let body = match after_open.find('\n') {
        Some(nl) => &after_open[nl + 1..],
        None => {
            let info_len = after_open
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(after_open.len());
            &after_open[info_len..]
        }
    };

    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}

/// Integer-parse semantics: integers as-is, floats truncated, strings by their
/// leading digits. Missing, non-numeric or negative values become
/// [`DEFAULT_QUANTITY`].
pub fn coerce_quantity(value: Option<&Value>) -> i64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        }),
        Some(Value::String(s)) => leading_integer(s),
        _ => None,
    };

    match parsed {
        Some(q) if q >= 0 => q,
        _ => DEFAULT_QUANTITY,
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fenced_array_yields_items() {
        let items = parse_vision_reply("```json\n[{\"name\":\"Apple\",\"quantity\":3}]\n```")
            .expect("parse");
        assert_eq!(
            items,
            vec![DetectedItem {
                name: "Apple".to_string(),
                quantity: 3
            }]
        );
    }

    #[test]
    fn items_wrapper_is_accepted() {
        let items =
            parse_vision_reply(r#"{"items":[{"name":"Milk","quantity":"2"},{"name":"Egg"}]}"#)
                .expect("parse");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[1].quantity, DEFAULT_QUANTITY);
    }

    #[test]
    fn non_json_is_rejected() {
        assert!(parse_vision_reply("not json").is_err());
        assert!(parse_vision_reply("").is_err());
    }

    #[test]
    fn unexpected_object_is_rejected() {
        assert!(parse_vision_reply(r#"{"food":[{"name":"Apple"}]}"#).is_err());
    }

    #[test]
    fn entries_without_names_are_skipped() {
        let items = parse_vision_reply(r#"[{"quantity":2},{"name":"  "},{"name":" Kiwi "}]"#)
            .expect("parse");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Kiwi");
    }

    #[test]
    fn fence_with_leading_prose() {
        let text = "Here you go:\n```\n[]\n```\nEnjoy";
        assert_eq!(strip_code_fence(text), "[]");
    }

    #[test]
    fn unfenced_text_is_trimmed() {
        assert_eq!(strip_code_fence("  [1]\n"), "[1]");
    }

    #[test]
    fn single_line_fence_drops_info_string() {
        let items = parse_vision_reply("```json [{\"name\":\"Apple\",\"quantity\":2}]```")
            .expect("single-line fence");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Apple");
        assert_eq!(items[0].quantity, 2);
        assert_eq!(strip_code_fence("```[1]```"), "[1]");
    }

    #[test]
    fn quantity_coercion() {
        assert_eq!(coerce_quantity(Some(&json!(4))), 4);
        assert_eq!(coerce_quantity(Some(&json!(2.9))), 2);
        assert_eq!(coerce_quantity(Some(&json!("3 apples"))), 3);
        assert_eq!(coerce_quantity(Some(&json!("two"))), 1);
        assert_eq!(coerce_quantity(Some(&json!(-2))), 1);
        assert_eq!(coerce_quantity(Some(&json!(0))), 0);
        assert_eq!(coerce_quantity(Some(&json!(null))), 1);
        assert_eq!(coerce_quantity(None), 1);
    }
}
