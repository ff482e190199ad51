use crate::dict::local::WordSet;

/// Generate ranked spelling suggestions for a (lowercase) word.
pub fn generate(word: &str, words: &WordSet, max_suggestions: usize) -> Vec<String> {
    if max_suggestions == 0 || word.is_empty() {
        return Vec::new();
    }

    // 1. Everything one edit away, plus swapped adjacent letters
    let mut candidates = words.within_distance(word, 1);
    candidates.extend(transpositions(word).into_iter().filter(|c| words.contains(c)));

    // 2. Two edits away, only when still short of candidates
    if candidates.len() < max_suggestions && word.chars().count() > 3 {
        candidates.extend(words.within_distance(word, 2));
    }

    candidates.sort();
    candidates.dedup();
    candidates.retain(|c| c != word);

    // Closest first, alphabetical among equals
    candidates.sort_by_cached_key(|c| edit_distance(word, c));
    candidates.truncate(max_suggestions);
    candidates
}

/// Edit distance where swapping two adjacent characters counts as one edit
/// (optimal string alignment).
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut matrix = vec![vec![0; b.len() + 1]; a.len() + 1];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, item) in matrix[0].iter_mut().enumerate() {
        *item = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (matrix[i - 1][j] + 1) // deletion
                .min(matrix[i][j - 1] + 1) // insertion
                .min(matrix[i - 1][j - 1] + cost); // substitution
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(matrix[i - 2][j - 2] + 1); // transposition
            }
            matrix[i][j] = best;
        }
    }

    matrix[a.len()][b.len()]
}

fn transpositions(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    (0..chars.len().saturating_sub(1))
        .filter(|&i| chars[i] != chars[i + 1])
        .map(|i| {
            let mut swapped = chars.clone();
            swapped.swap(i, i + 1);
            swapped.into_iter().collect()
        })
        .collect()
}

/// Carry the capitalization of `original` over to a lowercase suggestion.
pub fn match_case(original: &str, suggestion: &str) -> String {
    let mut chars = original.chars();
    let first_upper = chars.next().is_some_and(char::is_uppercase);
    let all_upper = first_upper && original.chars().count() > 1 && chars.all(|c| !c.is_lowercase());

    if all_upper {
        suggestion.to_uppercase()
    } else if first_upper {
        let mut out = String::with_capacity(suggestion.len());
        let mut rest = suggestion.chars();
        if let Some(first) = rest.next() {
            out.extend(first.to_uppercase());
        }
        out.extend(rest);
        out
    } else {
        suggestion.to_string()
    }
}
