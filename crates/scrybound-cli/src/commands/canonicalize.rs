//! Canonicalize command implementation.

use serde_json::json;
use std::path::Path;

use scrybound_canonical::{Canonicalizer, Encoding, InputKind, RawInput};

use super::{read_input, Options};
use crate::output;

pub fn run(opts: &Options, input: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let form = opts.client_config()?.boundary.form;
    let canonicalizer = Canonicalizer::new(Encoding::Utf8, form);

    let bytes = read_input(input)?;
    let name = input
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stdin".to_string());
    let canonical =
        canonicalizer.canonicalize_with_report(&name, RawInput::Bytes(&bytes), InputKind::Bytes)?;

    if opts.json {
        let report = json!({ "text": canonical.text, "report": canonical.report });
        println!("{}", output::format_json(&report));
    } else {
        print!("{}", canonical.text);
    }
    Ok(())
}
