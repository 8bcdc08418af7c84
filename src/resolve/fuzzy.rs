//! resolve::fuzzy
//!
//! Edit-distance matching for "did you mean" suggestions.
//!
//! # Algorithm
//!
//! 1. A candidate equal to the input (ignoring case) is returned alone.
//! 2. Otherwise every candidate is scored by Levenshtein distance between
//!    the lowercased input and the lowercased candidate.
//! 3. Candidates within [`MAX_DISTANCE`] are kept, sorted by distance
//!    (stable, so ties keep candidate order) and cut to
//!    [`MAX_SUGGESTIONS`].

/// Largest edit distance still offered as a suggestion.
pub const MAX_DISTANCE: usize = 3;

/// Number of suggestions shown.
pub const MAX_SUGGESTIONS: usize = 3;

/// Classic Levenshtein distance (unit cost insert, delete, substitute).
///
/// Works on `char`s, not bytes.
///
/// ```
/// use dotinspect::resolve::fuzzy::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("", "abc"), 3);
/// ```
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Candidates closest to `input`, best first.
pub fn find_closest<'a>(input: &str, candidates: &[&'a str]) -> Vec<&'a str> {
    let lower = input.to_lowercase();

    if let Some(exact) = candidates.iter().find(|c| c.to_lowercase() == lower) {
        return vec![*exact];
    }

    let mut scored: Vec<(usize, &'a str)> = candidates
        .iter()
        .map(|c| (levenshtein(&lower, &c.to_lowercase()), *c))
        .filter(|(dist, _)| *dist <= MAX_DISTANCE)
        .collect();
    scored.sort_by_key(|(dist, _)| *dist);

    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name)
        .collect()
}

/// User-facing message for a failed lookup of `input` among `candidates`.
///
/// `kind` names what was looked up, e.g. `pallet` or
/// `storage item in System`.
///
/// # Example
///
/// ```
/// use dotinspect::resolve::fuzzy::suggest_message;
///
/// let pallets = ["Balances", "System", "Staking"];
/// assert_eq!(
///     suggest_message("pallet", "Systme", &pallets),
///     "Unknown pallet \"Systme\". Did you mean: System?"
/// );
/// assert_eq!(
///     suggest_message("pallet", "Zzzzzzz", &pallets),
///     "Unknown pallet \"Zzzzzzz\"."
/// );
/// ```
pub fn suggest_message(kind: &str, input: &str, candidates: &[&str]) -> String {
    let suggestions = find_closest(input, candidates);
    match suggestions.as_slice() {
        [] => format!("Unknown {} \"{}\".", kind, input),
        // Only reachable for a case-only mismatch, which callers resolve
        // before asking for suggestions.
        [only] if only.to_lowercase() == input.to_lowercase() => only.to_string(),
        _ => format!(
            "Unknown {} \"{}\". Did you mean: {}?",
            kind,
            input,
            suggestions.join(", ")
        ),
    }
}
