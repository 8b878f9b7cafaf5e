//! Fuzzy identity matching between the employee feed and the positioning
//! service.
//!
//! The positioning service often carries shorter names than the employee
//! feed (no middle names), e.g. "Jozef Swiatycki" vs
//! "Jozef Zbigniew Swiatycki". Names are compared on normalized first and
//! last tokens; interior tokens are ignored.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::models::employee::RawEmployee;
use crate::models::position::RawPosition;

/// Lowercase, strip diacritics and punctuation, split into tokens.
/// Lowercasing runs before decomposition so multi-character expansions
/// (e.g. 'İ' → "i" + combining dot) have their marks stripped too.
pub fn normalize_name(name: &str) -> Vec<String> {
    name.chars()
        .flat_map(char::to_lowercase)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// True when the normalized names are equal, or when both have at least two
/// tokens and agree on the first and last token (middle names tolerated on
/// either side).
pub fn names_match(a: &str, b: &str) -> bool {
    let a = normalize_name(a);
    let b = normalize_name(b);

    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    a.len() >= 2 && b.len() >= 2 && a[0] == b[0] && a[a.len() - 1] == b[b.len() - 1]
}

/// Match every employee against the occupied placements. At most one match
/// per employee; when several placements match, the first in the input's
/// original order wins. This tie-break is stable and arbitrary, not a
/// semantic disambiguation.
///
/// Unmatched employees simply get no entry; matching never fails.
pub fn match_positions<'a>(
    employees: &[RawEmployee],
    positions: &'a [RawPosition],
) -> HashMap<String, &'a RawPosition> {
    let occupied: Vec<&RawPosition> = positions.iter().filter(|p| p.is_occupied()).collect();

    let mut matches = HashMap::new();
    for emp in employees {
        let name = emp.display_name();
        if let Some(pos) = occupied.iter().find(|p| names_match(&name, &p.name)) {
            matches.insert(emp.person_id.clone(), *pos);
        }
    }
    matches
}
