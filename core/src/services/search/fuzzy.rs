//! Approximate substring matching for catalog search
//!
//! The score of a pattern against a text is the smallest edit distance
//! between the pattern and any substring of the text, divided by the
//! pattern length: 0 is an exact occurrence, 1 matches nothing useful.
//! Comparison is case-insensitive.

/// Normalised score in `0.0..=1.0`; an empty pattern scores 1
pub fn score(pattern: &str, text: &str) -> f64 {
    let pattern: Vec<char> = pattern.to_lowercase().chars().collect();
    if pattern.is_empty() {
        return 1.0;
    }
    let text: Vec<char> = text.to_lowercase().chars().collect();

    // Sellers' algorithm: a match may start anywhere in the text
    let mut previous: Vec<usize> = vec![0; text.len() + 1];
    let mut current: Vec<usize> = vec![0; text.len() + 1];
    for (i, p) in pattern.iter().enumerate() {
        current[0] = i + 1;
        for (j, t) in text.iter().enumerate() {
            let substitution = previous[j] + usize::from(p != t);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    let best = previous.iter().copied().min().unwrap_or(pattern.len());
    (best as f64 / pattern.len() as f64).min(1.0)
}

/// Best score across several fields
pub fn best_score<'a>(pattern: &str, fields: impl IntoIterator<Item = &'a str>) -> f64 {
    fields
        .into_iter()
        .map(|field| score(pattern, field))
        .fold(1.0, f64::min)
}
