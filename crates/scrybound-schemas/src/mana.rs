//! Mana cost symbols.

/// Every symbol that may appear in a mana cost.
pub const MANA_SYMBOLS: &[&str] = &[
    "{T}", "{Q}", "{E}", "{PW}", "{CHAOS}", "{X}", "{Y}", "{Z}", "{0}", "{½}", "{1}", "{2}",
    "{3}", "{4}", "{5}", "{6}", "{7}", "{8}", "{9}", "{10}", "{11}", "{12}", "{13}", "{14}",
    "{15}", "{16}", "{17}", "{18}", "{19}", "{20}", "{100}", "{1000000}", "{∞}", "{W/U}",
    "{W/B}", "{B/R}", "{B/G}", "{U/B}", "{U/R}", "{R/G}", "{R/W}", "{G/W}", "{G/U}", "{2/W}",
    "{2/U}", "{2/B}", "{2/R}", "{2/G}", "{P}", "{W/P}", "{U/P}", "{B/P}", "{R/P}", "{G/P}",
    "{HW}", "{HR}", "{W}", "{U}", "{B}", "{R}", "{G}", "{C}", "{S}",
];

/// Separator between the faces of a split card's cost.
pub const FACE_SEPARATOR: &str = " // ";

/// Pattern accepting a whole mana cost: any run of [`MANA_SYMBOLS`],
/// optionally repeated per face with [`FACE_SEPARATOR`]. The empty cost
/// (lands) matches.
pub fn mana_cost_pattern() -> String {
    let symbols = MANA_SYMBOLS
        .iter()
        .map(|symbol| regex::escape(symbol))
        .collect::<Vec<_>>()
        .join("|");
    format!(
        "(?:{symbols})*(?:{sep}(?:{symbols})*)*$",
        symbols = symbols,
        sep = regex::escape(FACE_SEPARATOR)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn whole_cost() -> Regex {
        Regex::new(&format!("^{}", mana_cost_pattern())).unwrap()
    }

    #[test]
    fn accepts_symbol_runs() {
        assert!(whole_cost().is_match("{2}{W}{U}"));
        assert!(whole_cost().is_match("{X}{G/P}{½}"));
    }

    #[test]
    fn accepts_split_card_faces() {
        assert!(whole_cost().is_match("{1}{R} // {2}{G}"));
    }

    #[test]
    fn empty_cost_matches() {
        assert!(whole_cost().is_match(""));
    }

    #[test]
    fn rejects_unknown_symbols_and_bare_text() {
        assert!(!whole_cost().is_match("{2}{K}"));
        assert!(!whole_cost().is_match("2WU"));
        assert!(!whole_cost().is_match("{1}{R}//{2}{G}"));
    }
}
