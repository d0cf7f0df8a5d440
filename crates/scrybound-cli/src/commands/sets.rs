//! Sets command implementation.

use chrono::NaiveDate;
use serde_json::Value;

use super::Options;
use crate::output;

pub fn run(opts: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let mut sets = opts.client()?.sets()?;
    sort_by_release(&mut sets);

    if opts.json {
        println!("{}", output::format_json(&Value::Array(sets)));
        return Ok(());
    }

    output::print_set_header();
    for set in &sets {
        println!("{}", output::format_set_row(set));
    }
    Ok(())
}

fn released_at(set: &Value) -> Option<NaiveDate> {
    let date = set.get("released_at")?.as_str()?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Oldest first; sets without a release date lead. Ties keep API order.
pub fn sort_by_release(sets: &mut [Value]) {
    sets.sort_by_key(released_at);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sorts_oldest_first() {
        let mut sets = vec![
            json!({ "code": "rna", "released_at": "2019-01-25" }),
            json!({ "code": "lea", "released_at": "1993-08-05" }),
            json!({ "code": "tbd" }),
            json!({ "code": "prw2", "released_at": "2019-01-25" }),
        ];
        sort_by_release(&mut sets);
        let codes: Vec<_> = sets.iter().map(|s| s["code"].as_str().unwrap()).collect();
        assert_eq!(codes, ["tbd", "lea", "rna", "prw2"]);
    }
}
