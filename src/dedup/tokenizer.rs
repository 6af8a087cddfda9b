// Word tokenizer shared by the set-overlap and vector-space strategies

/// Characters that separate words
const SEPARATORS: [char; 9] = [' ', '.', ',', '!', '?', ';', ':', '\t', '\n'];

fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

/// Split text into lower-cased word tokens
///
/// Splits on space, tab, newline and `. , ! ? ; :`, discarding empty
/// pieces. Other whitespace stays inside the token.
/// Total function: empty or separator-only input yields no tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(is_separator)
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Distinct tokens in first-occurrence order
pub fn unique_tokens(text: &str) -> Vec<String> {
    let mut seen = ahash::AHashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}
