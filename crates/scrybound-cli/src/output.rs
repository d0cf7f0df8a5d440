//! Output formatting utilities.

use serde_json::Value;

/// Formats a validated value as JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(|v| v.as_str()).unwrap_or("?")
}

/// Formats a set as a table row.
pub fn format_set_row(set: &Value) -> String {
    let card_count = set
        .get("card_count")
        .and_then(|v| v.as_u64())
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".to_string());
    format!(
        "{:<6} {:<40} {:<18} {:<10} {}",
        field(set, "code"),
        truncate(field(set, "name"), 40),
        field(set, "set_type"),
        set.get("released_at").and_then(|v| v.as_str()).unwrap_or("-"),
        card_count
    )
}

/// Prints the set table header.
#[allow(clippy::print_literal)]
pub fn print_set_header() {
    println!(
        "{:<6} {:<40} {:<18} {:<10} {}",
        "CODE", "NAME", "TYPE", "RELEASED", "CARDS"
    );
    println!("{}", "-".repeat(84));
}

/// Formats a card as a table row.
pub fn format_card_row(card: &Value) -> String {
    format!(
        "{:<6} {:<6} {:<36} {:<16} {:<9} {}",
        field(card, "set"),
        truncate(field(card, "collector_number"), 6),
        truncate(field(card, "name"), 36),
        truncate(card.get("mana_cost").and_then(|v| v.as_str()).unwrap_or(""), 16),
        field(card, "rarity"),
        field(card, "lang")
    )
}

/// Prints the card table header.
#[allow(clippy::print_literal)]
pub fn print_card_header() {
    println!(
        "{:<6} {:<6} {:<36} {:<16} {:<9} {}",
        "SET", "NUMBER", "NAME", "COST", "RARITY", "LANG"
    );
    println!("{}", "-".repeat(84));
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Ravnica", 10), "Ravnica");
        assert_eq!(truncate("Ravnica Allegiance", 10), "Ravnica...");
        assert_eq!(truncate("滋養の群れ滋養の群れ", 6), "滋養の...");
    }

    #[test]
    fn set_row_marks_missing_fields() {
        let row = format_set_row(&json!({ "code": "rna", "name": "Ravnica Allegiance" }));
        assert!(row.starts_with("rna    Ravnica Allegiance"));
        assert!(row.contains(" - "));
        assert!(row.ends_with('?'));
    }
}
