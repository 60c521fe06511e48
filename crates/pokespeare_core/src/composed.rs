use url::Url;

/// Display-ready record: sprite, artwork and the stylized description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComposedResult {
    pub name: String,
    pub artwork: Option<Url>,
    pub description: String,
    pub sprite: Option<Url>,
}

impl ComposedResult {
    /// Builds a result, capitalizing `query` for display.
    pub fn from_query(
        query: &str,
        artwork: Option<Url>,
        description: impl Into<String>,
        sprite: Option<Url>,
    ) -> Self {
        Self {
            name: capitalize_words(query),
            artwork,
            description: description.into(),
            sprite,
        }
    }
}

/// Uppercases the first character of every whitespace-separated word and
/// lowercases the rest. Whitespace is preserved as-is.
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            at_word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(capitalize_words("pikachu"), "Pikachu");
        assert_eq!(capitalize_words("mr. MIME"), "Mr. Mime");
        assert_eq!(capitalize_words("ho-oh"), "Ho-oh");
        assert_eq!(capitalize_words(""), "");
    }
}
