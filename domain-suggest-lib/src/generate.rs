//! Candidate domain generation engine.
//!
//! This module turns keyword tokens into `.com` candidate domain names using
//! fixed template rules: base forms, multi-word joins, creative prefixes and
//! suffixes, and industry-specific variants. It produces candidates only —
//! availability is determined separately by the checker.
//!
//! # Examples
//!
//! ```
//! use domain_suggest_lib::generate_candidates;
//!
//! let words = vec!["pet".to_string(), "shop".to_string()];
//! let candidates = generate_candidates(&words);
//!
//! assert!(candidates.contains(&"pet.com".to_string()));
//! assert!(candidates.contains(&"petshop.com".to_string()));
//! assert!(candidates.contains(&"pet-shop.com".to_string()));
//! assert!(candidates.iter().all(|d| d.ends_with(".com")));
//! ```

/// Creative prefixes applied to the first word and the full concatenation.
const CREATIVE_PREFIXES: [&str; 7] = ["get", "try", "best", "top", "pro", "smart", "easy"];

/// Creative suffixes applied to the first word and the full concatenation.
const CREATIVE_SUFFIXES: [&str; 7] = ["hub", "spot", "zone", "center", "place", "space", "world"];

/// Markers that trigger technology-flavored variants.
const TECH_MARKERS: [&str; 4] = ["tech", "code", "dev", "web"];

/// Markers that trigger commerce-flavored variants.
const SHOP_MARKERS: [&str; 4] = ["shop", "store", "buy", "sell"];

/// Push a `.com` candidate built from a base name.
fn push_com(candidates: &mut Vec<String>, base: String) {
    candidates.push(format!("{}.com", base));
}

/// Generate candidate `.com` domains from lowercase keyword tokens.
///
/// The rules are purely additive; the only removal is the final
/// order-preserving deduplication. Callers must reject empty input before
/// invoking this function — an empty token list yields an empty candidate
/// list rather than an error.
///
/// Rule groups, in generation order:
/// 1. Single-word base forms on the first word: literal, `my`-/`the`-prefixed,
///    `online`-/`site`-suffixed.
/// 2. Multi-word joins: full concatenation, full hyphenation, and for each
///    adjacent word pair the concatenated, hyphenated, and `and`-joined forms.
/// 3. Creative prefixes on the first word and the full concatenation.
/// 4. Creative suffixes likewise.
/// 5. Industry variants when the joined keywords mention technology or
///    commerce terms.
pub fn generate_candidates(words: &[String]) -> Vec<String> {
    generate_candidates_with_extras(words, &[], &[])
}

/// Generate candidates with additional creative affixes.
///
/// Deployments can extend the built-in prefix/suffix lists through
/// configuration; the extras participate in the same rule group as the
/// built-ins (first word plus full concatenation).
pub fn generate_candidates_with_extras(
    words: &[String],
    extra_prefixes: &[String],
    extra_suffixes: &[String],
) -> Vec<String> {
    let mut candidates = Vec::new();

    let Some(first) = words.first() else {
        return candidates;
    };
    let joined = words.concat();

    // 1. Single-word base forms
    push_com(&mut candidates, first.clone());
    push_com(&mut candidates, format!("my{}", first));
    push_com(&mut candidates, format!("the{}", first));
    push_com(&mut candidates, format!("{}online", first));
    push_com(&mut candidates, format!("{}site", first));

    // 2. Multi-word joins
    if words.len() >= 2 {
        push_com(&mut candidates, joined.clone());
        push_com(&mut candidates, words.join("-"));

        for pair in words.windows(2) {
            push_com(&mut candidates, format!("{}{}", pair[0], pair[1]));
            push_com(&mut candidates, format!("{}-{}", pair[0], pair[1]));
            push_com(&mut candidates, format!("{}and{}", pair[0], pair[1]));
        }
    }

    // 3. Creative prefixes
    let prefixes = CREATIVE_PREFIXES
        .iter()
        .copied()
        .chain(extra_prefixes.iter().map(String::as_str));
    for prefix in prefixes {
        push_com(&mut candidates, format!("{}{}", prefix, first));
        if words.len() >= 2 {
            push_com(&mut candidates, format!("{}{}", prefix, joined));
        }
    }

    // 4. Creative suffixes
    let suffixes = CREATIVE_SUFFIXES
        .iter()
        .copied()
        .chain(extra_suffixes.iter().map(String::as_str));
    for suffix in suffixes {
        push_com(&mut candidates, format!("{}{}", first, suffix));
        if words.len() >= 2 {
            push_com(&mut candidates, format!("{}{}", joined, suffix));
        }
    }

    // 5. Industry variants
    if TECH_MARKERS.iter().any(|marker| joined.contains(marker)) {
        push_com(&mut candidates, format!("{}dev", first));
        push_com(&mut candidates, format!("{}tech", first));
        push_com(&mut candidates, format!("code{}", first));
    }
    if SHOP_MARKERS.iter().any(|marker| joined.contains(marker)) {
        push_com(&mut candidates, format!("{}shop", first));
        push_com(&mut candidates, format!("{}store", first));
        push_com(&mut candidates, format!("buy{}", first));
    }

    dedup_preserving_order(candidates)
}

/// Remove duplicate candidates, keeping the first occurrence of each.
fn dedup_preserving_order(candidates: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}
