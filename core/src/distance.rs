//! Levenshtein edit distance, used to rank "did you mean" suggestions.

/// Computes the Levenshtein edit distance between two strings.
///
/// The distance is the minimum number of single-character substitutions,
/// insertions, and deletions (each cost 1) needed to transform one string
/// into the other. Comparison is case-sensitive and char-based.
///
/// # Examples
///
/// ```
/// use cmdtree_core::levenshtein;
///
/// assert_eq!(levenshtein("biuld", "build"), 2);
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("same", "same"), 0);
/// assert_eq!(levenshtein("", "abc"), 3);
/// ```
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row rolling DP over the full matrix.
    let mut prev: Vec<usize> = (0..=a.len()).collect();
    let mut row = vec![0; a.len() + 1];

    for (i, cb) in b.iter().enumerate() {
        row[0] = i + 1;
        for (j, ca) in a.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            row[j + 1] = (prev[j] + cost) // substitution
                .min(row[j] + 1) // insertion
                .min(prev[j + 1] + 1); // deletion
        }
        std::mem::swap(&mut prev, &mut row);
    }

    prev[a.len()]
}
