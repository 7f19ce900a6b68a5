use lazy_static::lazy_static;
use rapidfuzz::distance::indel;
use regex::Regex;
use std::collections::BTreeSet;

pub const MAX_SCORE: u8 = 100;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"\W").unwrap();
}

/// Order-independent token-set similarity in `0..=100`.
///
/// Both inputs are reduced to sorted sets of unique words. The shared words
/// are compared against each side's full word list, and the two full lists
/// against each other; the best of the three ratios wins. Reordered words
/// and names whose words are a subset of the other's score 100.
pub fn similarity(a: &str, b: &str) -> u8 {
    let a = preprocess(a);
    let b = preprocess(b);
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let shared: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let sect = shared.join(" ");
    let combined_a = join_tokens(&shared, &only_a);
    let combined_b = join_tokens(&shared, &only_b);

    ratio(&sect, &combined_a)
        .max(ratio(&sect, &combined_b))
        .max(ratio(&combined_a, &combined_b))
}

/// Character-level similarity `100 * 2 * LCS / (|x| + |y|)`, rounded half to even.
pub fn ratio(x: &str, y: &str) -> u8 {
    let total = x.chars().count() + y.chars().count();
    if total == 0 {
        return MAX_SCORE;
    }

    // indel similarity is |x| + |y| minus the indel distance, i.e. 2 * LCS
    let numerator = 100 * indel::similarity(x.chars(), y.chars());
    let mut score = numerator / total;
    let remainder = numerator % total;
    if 2 * remainder > total || (2 * remainder == total && score % 2 == 1) {
        score += 1;
    }
    score as u8
}

fn preprocess(s: &str) -> String {
    NON_WORD.replace_all(&s.to_lowercase(), " ").trim().to_string()
}

fn join_tokens(head: &[&str], tail: &[&str]) -> String {
    head.iter()
        .chain(tail.iter())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}
