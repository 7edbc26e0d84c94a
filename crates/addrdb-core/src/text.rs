// crates/addrdb-core/src/text.rs

/// Convert a string into a folded key suitable for indexing and comparison.
///
/// Folding is Unicode lowercasing, one character at a time. A character whose
/// lowercase form is more than one character (`İ`) is kept as is, so the
/// folded key always has exactly as many characters as the input and every
/// length threshold sees what the user typed. Letters are never
/// transliterated: `Tromsø` folds to `tromsø`, not `tromso`.
///
/// # Examples
///
/// ```rust
/// use addrdb_core::fold_key;
///
/// assert_eq!(fold_key("Tromsø"), "tromsø");
/// assert_eq!(fold_key("BÆRUM"), "bærum");
/// assert_eq!(fold_key("OSLO"), "oslo");
/// ```
pub fn fold_key(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Length in characters, the unit every length threshold is measured in.
#[inline]
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Every prefix of `folded` that is at least `min_len` characters long,
/// shortest first. A `min_len` of zero is treated as one: the empty string is
/// never a prefix key.
///
/// ```rust
/// use addrdb_core::text::prefixes;
///
/// let keys: Vec<&str> = prefixes("oslo", 3).collect();
/// assert_eq!(keys, ["osl", "oslo"]);
/// ```
pub fn prefixes(folded: &str, min_len: usize) -> impl Iterator<Item = &str> + '_ {
    let min_len = min_len.max(1);
    folded
        .char_indices()
        .map(|(start, ch)| start + ch.len_utf8())
        .enumerate()
        .filter(move |(n, _)| n + 1 >= min_len)
        .map(move |(_, end)| &folded[..end])
}

/// Whitespace-separated words of a folded value.
pub fn words(folded: &str) -> impl Iterator<Item = &str> + '_ {
    folded.split_whitespace()
}
