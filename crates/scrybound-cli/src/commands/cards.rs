//! Cards command implementation.

use super::Options;
use crate::output;

pub fn run(opts: &Options, page: Option<u32>) -> Result<(), Box<dyn std::error::Error>> {
    let page_number = page.unwrap_or(1);
    let page = opts.client()?.cards_page(page_number)?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    output::print_card_header();
    for card in &page.data {
        println!("{}", output::format_card_row(card));
    }
    for warning in &page.warnings {
        eprintln!("warning: {}", warning);
    }
    if page.has_more {
        eprintln!("more results: --page {}", page_number + 1);
    }
    Ok(())
}
