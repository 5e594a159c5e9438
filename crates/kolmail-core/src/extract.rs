//! Extraction of items and Meat embedded in kmail bodies.
//!
//! The game renders attachments inside the message HTML the same way it
//! renders drops:
//!
//! ```text
//! You acquire an item: <b>seal-clubbing club</b>
//! You acquire <b>helmet turtle (3)</b>
//! You acquire <b>12 boxes of sunshine</b>
//! You gain 1,500 Meat.
//! ```
//!
//! Names come back exactly as displayed, so plural forms still need a
//! catalog lookup to become items.

const ACQUIRE: &str = "You acquire ";
const ACQUIRE_ONE: &str = "an item: ";
const GAIN: &str = "You gain ";
const MEAT: &str = " Meat";

/// Extracts `(name, quantity)` pairs, merging repeats in first-seen order.
#[must_use]
pub fn extract_items(text: &str) -> Vec<(String, u32)> {
    let mut found: Vec<(String, u32)> = Vec::new();

    for (start, _) in text.match_indices(ACQUIRE) {
        let rest = &text[start + ACQUIRE.len()..];
        let (single, rest) = rest
            .strip_prefix(ACQUIRE_ONE)
            .map_or((false, rest), |rest| (true, rest));
        let Some(content) = bold_content(rest) else {
            continue;
        };
        let content = decode_entities(content.trim());
        let (name, quantity) = if single {
            (content, 1)
        } else {
            split_quantity(&content)
        };
        if name.is_empty() || quantity == 0 {
            continue;
        }

        match found.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, count)) => *count = count.saturating_add(quantity),
            None => found.push((name, quantity)),
        }
    }

    found
}

/// Sums every `You gain N Meat` notation; 0 when there is none.
#[must_use]
pub fn extract_meat(text: &str) -> u64 {
    text.match_indices(GAIN)
        .filter_map(|(start, _)| {
            let rest = &text[start + GAIN.len()..];
            let end = rest
                .find(|c: char| !(c.is_ascii_digit() || c == ','))
                .unwrap_or(rest.len());
            if !rest[end..].starts_with(MEAT) {
                return None;
            }
            parse_grouped_number(&rest[..end])
        })
        .fold(0u64, u64::saturating_add)
}

fn bold_content(text: &str) -> Option<&str> {
    let inner = text.strip_prefix("<b>")?;
    let end = inner.find("</b>")?;
    Some(&inner[..end])
}

/// Splits `name (N)` or `N name`; anything else is a single copy.
fn split_quantity(content: &str) -> (String, u32) {
    if let Some(open) = content.rfind(" (") {
        if let Some(count) = content[open + 2..]
            .strip_suffix(')')
            .and_then(parse_grouped_number)
        {
            return (content[..open].trim().to_string(), clamp(count));
        }
    }

    if let Some((prefix, name)) = content.split_once(' ') {
        if let Some(count) = parse_grouped_number(prefix) {
            return (name.trim().to_string(), clamp(count));
        }
    }

    (content.to_string(), 1)
}

fn clamp(count: u64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Parses digits with optional thousands separators.
fn parse_grouped_number(text: &str) -> Option<u64> {
    if text.is_empty() || !text.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    let digits: String = text.chars().filter(|c| *c != ',').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
