//! Schemas command implementation.

use scrybound_schemas::SchemaRegistry;

use super::Options;

pub fn run(opts: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let registry = SchemaRegistry::catalog()?;
    let names: Vec<&str> = registry.names().collect();

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}
