//! Text canonicalization used for every fuzzy comparison.

/// Lower-case `text` and drop every whitespace character.
///
/// Raw user text is never compared directly; both sides of a fuzzy match go
/// through this function first.
///
/// # Examples
///
/// ```
/// use albion_market_data::resolver::normalize;
///
/// assert_eq!(normalize("T4 Bag"), normalize("t4bag"));
/// assert_eq!(normalize("갑옷 말"), "갑옷말");
/// ```
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
