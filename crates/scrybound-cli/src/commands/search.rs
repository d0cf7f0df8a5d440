//! Search command implementation.

use serde_json::Value;
use scrybound_client::build_query;

use super::Options;
use crate::output;

pub fn run(
    opts: &Options,
    query: &str,
    set: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = format!("{}{}", build_query(set), query);
    let cards = opts.client()?.cards_search(&query)?;

    if opts.json {
        println!("{}", output::format_json(&Value::Array(cards)));
        return Ok(());
    }

    output::print_card_header();
    for card in &cards {
        println!("{}", output::format_card_row(card));
    }
    Ok(())
}
