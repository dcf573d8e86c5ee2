///
/// Longest common substring of `full` and `partial`, returned as a slice of
/// `full`.
///
/// Classic dynamic programming over both strings, `full` in the outer loop.
/// Only a strictly longer match replaces the current best, so on ties the
/// match ending earliest in `full` wins. Two rows of the table are kept.
///
pub fn find_longest_substring<'a>(full: &'a str, partial: &str) -> &'a str {
    let full_bytes = full.as_bytes();
    let partial_bytes = partial.as_bytes();

    let mut previous = vec![0usize; partial_bytes.len() + 1];
    let mut current = vec![0usize; partial_bytes.len() + 1];
    let (mut best_len, mut best_end) = (0, 0);

    for x in 1..=full_bytes.len() {
        for y in 1..=partial_bytes.len() {
            if full_bytes[x - 1] == partial_bytes[y - 1] {
                current[y] = previous[y - 1] + 1;
                if current[y] > best_len {
                    best_len = current[y];
                    best_end = x;
                }
            } else {
                current[y] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }

    full.get(best_end - best_len..best_end).unwrap_or("")
}
