//! Approximate record resolution by edit distance.
//!
//! Spoken names arrive misheard ("parasetamol" for Paracetamol), so
//! resolution picks the closest stored record within a fixed tolerance
//! instead of requiring an exact match.

use crate::models::Record;

/// Maximum accepted edit distance between a query and a record name.
pub const MATCH_THRESHOLD: usize = 3;

/// Compute Levenshtein edit distance between two strings.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0usize; n + 1];

    for (i, &a_ch) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &b_ch) in b_chars.iter().enumerate() {
            let cost = if a_ch == b_ch { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Resolve a spoken name against a candidate set.
///
/// Lower-cases both sides, picks the minimum-distance candidate and accepts
/// it only within [`MATCH_THRESHOLD`]. Ties keep the first candidate in
/// input order. An empty query or empty candidate set resolves to nothing.
pub fn best_match<'a>(query: &str, candidates: &'a [Record]) -> Option<&'a Record> {
    if query.trim().is_empty() || candidates.is_empty() {
        return None;
    }

    let query = query.to_lowercase();
    let mut best: Option<(&Record, usize)> = None;

    for record in candidates {
        let dist = edit_distance(&query, &record.name.to_lowercase());
        match best {
            Some((_, lowest)) if dist >= lowest => {}
            _ => best = Some((record, dist)),
        }
    }

    best.and_then(|(record, dist)| (dist <= MATCH_THRESHOLD).then_some(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(names: &[&str]) -> Vec<Record> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Record {
                id: i as i64 + 1,
                name: name.to_string(),
                category: "General".to_string(),
            })
            .collect()
    }

    // ── Distance properties ──────────────────────────────────

    #[test]
    fn distance_is_zero_iff_equal() {
        assert_eq!(edit_distance("aspirin", "aspirin"), 0);
        assert_eq!(edit_distance("", ""), 0);
        assert!(edit_distance("aspirin", "asprin") > 0);
    }

    #[test]
    fn distance_is_symmetric() {
        for (a, b) in [
            ("parasetamol", "paracetamol"),
            ("kitten", "sitting"),
            ("", "abc"),
            ("ibuprofen", "tramadol"),
        ] {
            assert_eq!(edit_distance(a, b), edit_distance(b, a));
        }
    }

    #[test]
    fn distance_satisfies_triangle_inequality() {
        let samples = ["paracetamol", "parasetamol", "tramadol", "", "aspirin"];
        for a in samples {
            for b in samples {
                for c in samples {
                    let ab = edit_distance(a, b);
                    let bc = edit_distance(b, c);
                    let ac = edit_distance(a, c);
                    assert!(ac <= ab + bc, "triangle violated for {a:?} {b:?} {c:?}");
                }
            }
        }
    }

    #[test]
    fn distance_known_values() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("parasetamol", "paracetamol"), 1);
        assert_eq!(edit_distance("abc", ""), 3);
    }

    // ── Candidate resolution ─────────────────────────────────

    #[test]
    fn misheard_name_resolves_within_threshold() {
        let candidates = records(&["Paracetamol"]);
        let matched = best_match("parasetamol", &candidates).unwrap();
        assert_eq!(matched.name, "Paracetamol");
    }

    #[test]
    fn nothing_within_threshold_is_no_match() {
        let candidates = records(&["Paracetamol", "Ibuprofen", "Tramadol"]);
        assert!(best_match("xyz123", &candidates).is_none());
    }

    #[test]
    fn ties_keep_the_first_candidate() {
        // "abx" is distance 1 from both "abc" and "abd".
        let candidates = records(&["abc", "abd"]);
        let matched = best_match("abx", &candidates).unwrap();
        assert_eq!(matched.name, "abc");
    }

    #[test]
    fn empty_query_or_candidates_is_no_match() {
        assert!(best_match("", &records(&["Paracetamol"])).is_none());
        assert!(best_match("   ", &records(&["Paracetamol"])).is_none());
        assert!(best_match("paracetamol", &[]).is_none());
    }

    #[test]
    fn matching_ignores_case() {
        let candidates = records(&["PARACETAMOL"]);
        assert!(best_match("paracetamol", &candidates).is_some());
    }
}
