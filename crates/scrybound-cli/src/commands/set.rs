//! Set command implementation.

use super::Options;
use crate::output;

pub fn run(opts: &Options, code: &str) -> Result<(), Box<dyn std::error::Error>> {
    let set = opts.client()?.set_by_code(code)?;

    if opts.json {
        println!("{}", output::format_json(&set));
    } else {
        output::print_set_header();
        println!("{}", output::format_set_row(&set));
    }
    Ok(())
}
