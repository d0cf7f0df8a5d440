//! Validate command implementation.

use std::path::Path;
use tracing::debug;

use scrybound_core::{Binding, BindingRegistry, RawResponse, TrustBoundary};
use scrybound_schemas::SchemaRegistry;

use super::{read_input, Options};
use crate::output;

pub fn run(
    opts: &Options,
    file: &Path,
    schema: &str,
    content_type: &str,
    keyfilter: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = opts.client_config()?;
    let node = SchemaRegistry::catalog()?.require(schema)?;

    let mut binding = Binding::new(node).form(config.boundary.form);
    if let Some(key) = keyfilter {
        binding = binding.keyfilter(key);
    }
    let registry = BindingRegistry::builder().bind(schema, binding)?.build();
    let boundary = TrustBoundary::with_config(registry, &config.boundary);

    let body = read_input(Some(file))?;
    debug!(file = %file.display(), bytes = body.len(), "validating local payload");
    let value = boundary.validate(schema, &RawResponse::new(content_type, body))?;

    if opts.json {
        println!("{}", output::format_json(&value));
    } else {
        println!("OK: {} conforms to {}", file.display(), schema);
    }
    Ok(())
}
