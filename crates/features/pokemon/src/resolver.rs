//! Tiered lookup of a free-form term: pokedex number, then store id, then name.

use crate::model::normalize_name;
use crate::store::{Filter, PokemonStore};

/// Largest integer an IEEE-754 double represents exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// One resolution tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStrategy {
    ByNo,
    ById,
    ByName,
}

/// A concrete store query produced by a tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Filter(Filter),
    Id(String),
}

impl ResolveStrategy {
    /// Tiers in the order they are tried. The first hit wins.
    pub const ORDER: [Self; 3] = [Self::ByNo, Self::ById, Self::ByName];

    /// The query this tier runs for `term`, or `None` when the tier does not apply.
    #[must_use]
    pub fn lookup(self, term: &str, store: &dyn PokemonStore) -> Option<Lookup> {
        match self {
            Self::ByNo => parse_no(term).map(|no| Lookup::Filter(Filter::No(no))),
            Self::ById => store.is_valid_id(term).then(|| Lookup::Id(term.to_owned())),
            Self::ByName => Some(Lookup::Filter(Filter::Name(normalize_name(term)))),
        }
    }
}

/// Every query that resolving `term` may run, in order.
#[must_use]
pub fn plan(term: &str, store: &dyn PokemonStore) -> Vec<(ResolveStrategy, Lookup)> {
    ResolveStrategy::ORDER
        .into_iter()
        .filter_map(|strategy| strategy.lookup(term, store).map(|lookup| (strategy, lookup)))
        .collect()
}

/// Reads `term` as a pokedex number.
///
/// Surrounding whitespace is ignored. Decimal or exponent notation is accepted
/// as long as the value is a whole number (`"25"`, `" 25 "`, `"2.5e1"`, `"25.0"`),
/// and so are `0x`, `0o` and `0b` integer literals (`"0x19"`).
/// Fractional, non-finite, and non-numeric terms yield `None`, since no stored
/// number could equal them.
#[must_use]
pub fn parse_no(term: &str) -> Option<i64> {
    let trimmed = term.trim();
    if let Ok(no) = trimmed.parse::<i64>() {
        return Some(no);
    }
    if let Some(no) = parse_prefixed(trimmed) {
        return Some(no);
    }
    if trimmed.chars().any(char::is_alphabetic) && !is_exponent_literal(trimmed) {
        return None;
    }
    let value = trimmed.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if value.fract() != 0.0 || value.abs() > MAX_EXACT_INTEGER {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(value as i64)
}

/// Integer literal with a radix prefix and an optional sign: `0x19`, `-0b11`, `0O31`.
fn parse_prefixed(term: &str) -> Option<i64> {
    let (negative, unsigned) = match term.as_bytes().first() {
        Some(b'-') => (true, &term[1..]),
        Some(b'+') => (false, &term[1..]),
        _ => (false, term),
    };
    let radix = match unsigned.get(..2)?.to_ascii_lowercase().as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &unsigned[2..];
    // from_str_radix takes its own sign, which would allow "0x-19".
    if digits.starts_with(['+', '-']) {
        return None;
    }
    let value = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -value } else { value })
}

/// `f64::from_str` also takes `inf` and `NaN`; only digits with an `e` exponent pass.
fn is_exponent_literal(term: &str) -> bool {
    term.chars().filter(|c| c.is_alphabetic()).all(|c| c.eq_ignore_ascii_case(&'e'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn parses_integer_forms() {
        assert_eq!(parse_no("25"), Some(25));
        assert_eq!(parse_no(" 25 "), Some(25));
        assert_eq!(parse_no("+7"), Some(7));
        assert_eq!(parse_no("25.0"), Some(25));
        assert_eq!(parse_no("2.5e1"), Some(25));
        assert_eq!(parse_no("-3"), Some(-3));
        assert_eq!(parse_no("0x19"), Some(25));
        assert_eq!(parse_no("0X19"), Some(25));
        assert_eq!(parse_no("0o31"), Some(25));
        assert_eq!(parse_no("0b11001"), Some(25));
        assert_eq!(parse_no(" -0x19 "), Some(-25));
    }

    #[test]
    fn rejects_non_integers() {
        assert_eq!(parse_no("pikachu"), None);
        assert_eq!(parse_no("2.5"), None);
        assert_eq!(parse_no(""), None);
        assert_eq!(parse_no("   "), None);
        assert_eq!(parse_no("inf"), None);
        assert_eq!(parse_no("NaN"), None);
        assert_eq!(parse_no("25abc"), None);
        assert_eq!(parse_no("1e400"), None);
        assert_eq!(parse_no("0x"), None);
        assert_eq!(parse_no("0xg1"), None);
        assert_eq!(parse_no("0x-19"), None);
        assert_eq!(parse_no("0b102"), None);
    }

    #[test]
    fn numeric_term_tries_number_then_name() {
        let store = MemoryStore::new();
        let tiers: Vec<_> = plan("25", &store).into_iter().map(|(s, _)| s).collect();
        assert_eq!(tiers, [ResolveStrategy::ByNo, ResolveStrategy::ByName]);
    }

    #[test]
    fn id_shaped_term_tries_id_then_name() {
        let store = MemoryStore::new();
        let steps = plan("65a1f0c2e4b0a1b2c3d4e5f6", &store);
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].1, Lookup::Id("65a1f0c2e4b0a1b2c3d4e5f6".to_owned()));
        assert_eq!(steps[1].0, ResolveStrategy::ByName);
    }

    #[test]
    fn name_lookup_is_normalized() {
        let store = MemoryStore::new();
        let steps = plan("  PIKACHU ", &store);
        let by_name = Lookup::Filter(Filter::Name("pikachu".to_owned()));
        assert_eq!(steps, [(ResolveStrategy::ByName, by_name)]);
    }

    proptest! {
        #[test]
        fn every_integer_round_trips(no in -1_000_000i64..1_000_000) {
            prop_assert_eq!(parse_no(&no.to_string()), Some(no));
        }

        #[test]
        fn lowercase_words_are_never_numbers(word in "[a-df-z][a-z]{0,11}") {
            prop_assert_eq!(parse_no(&word), None);
        }
    }
}
