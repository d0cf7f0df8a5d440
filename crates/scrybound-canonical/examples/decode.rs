use scrybound_canonical::{parse_content_type, parse_json, Canonicalizer, InputKind, RawInput};

fn main() {
    let header = "application/json; charset=utf-8";
    let body = b"{\"name\": \"Montre\xcc\x81al\", \"object\": \"set\"}";

    let content_type = match parse_content_type(header) {
        Ok(content_type) => content_type,
        Err(err) => {
            eprintln!("bad header: {}", err);
            std::process::exit(1);
        }
    };
    let charset = content_type.charset().unwrap_or("utf-8");

    let result = Canonicalizer::from_labels(charset, "NFC")
        .map_err(|err| err.to_string())
        .and_then(|canonicalizer| {
            canonicalizer
                .canonicalize_with_report("body", RawInput::Bytes(body), InputKind::Bytes)
                .map_err(|err| err.to_string())
        })
        .and_then(|canonical| {
            println!("hygiene: {:?}", canonical.report.status);
            parse_json("body", &canonical.text, Some("name")).map_err(|err| err.to_string())
        });

    match result {
        Ok(name) => println!("{}", name),
        Err(err) => {
            eprintln!("canonicalization failed: {}", err);
            std::process::exit(1);
        }
    }
}
