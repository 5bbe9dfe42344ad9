//! Ingredient input normalization.
//!
//! Turns raw free-text ingredient input into an [`IngredientSet`]: a
//! deduplicated, trimmed token collection whose identity is independent
//! of token order and duplication. The serialized (comma-joined) order is
//! incidental; the cache layer imposes its own stable ordering when it
//! derives a key.

use tracing::debug;

use crate::{ForageError, Result};

/// Characters that split free-text input into tokens.
const SEPARATORS: &[char] = &[',', '.', '~', '_', '"', '\\', ' ', '-'];

/// Characters that invalidate an ingredient token outright.
const DISALLOWED: &[char] = &['@', '!', '#', '$', '%', '*', '(', ')'];

/// A canonical, order-independent, deduplicated set of ingredient tokens.
///
/// Constructed via [`IngredientSet::parse`]; immutable thereafter.
/// Equality and hashing ignore token order, so any permutation or
/// duplication of the same tokens yields an identity-equal set.
#[derive(Debug, Clone)]
pub struct IngredientSet {
    tokens: Vec<String>,
}

impl IngredientSet {
    /// Parse raw free-text input into an ingredient set.
    ///
    /// Splits on runs of separator characters (comma, period, tilde,
    /// underscore, quote, backslash, space, hyphen) when at least one is
    /// present; otherwise the whole trimmed input is a single token.
    /// Tokens are trimmed, empties dropped, duplicates collapsed to the
    /// first occurrence.
    ///
    /// Rejection is all-or-nothing: a single token containing a
    /// disallowed character (`@ ! # $ % * ( )`) invalidates the entire
    /// input with [`ForageError::InvalidIngredient`]. An input yielding
    /// no tokens at all is [`ForageError::EmptyIngredients`].
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();

        let mut tokens: Vec<String> = Vec::new();
        let parts: Vec<&str> = if trimmed.contains(SEPARATORS) {
            trimmed.split(SEPARATORS).collect()
        } else {
            vec![trimmed]
        };

        for part in parts {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if !tokens.iter().any(|t| t == part) {
                tokens.push(part.to_string());
            }
        }

        for token in &tokens {
            if token.contains(DISALLOWED) {
                debug!(token, "rejecting ingredient with disallowed character");
                return Err(ForageError::InvalidIngredient(token.clone()));
            }
        }

        if tokens.is_empty() {
            return Err(ForageError::EmptyIngredients);
        }

        Ok(Self { tokens })
    }

    /// Tokens in first-seen order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Tokens sorted lexicographically, the stable order used for cache
    /// key derivation.
    pub fn sorted_tokens(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.tokens.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        sorted
    }

    /// The comma-joined canonical form used as the search query.
    pub fn joined(&self) -> String {
        self.tokens.join(",")
    }

    /// Number of distinct ingredients.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the set holds no ingredients.
    ///
    /// Always false for sets built by [`parse`](Self::parse), which
    /// rejects empty input.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl PartialEq for IngredientSet {
    fn eq(&self, other: &Self) -> bool {
        self.sorted_tokens() == other.sorted_tokens()
    }
}

impl Eq for IngredientSet {}

impl std::hash::Hash for IngredientSet {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for token in self.sorted_tokens() {
            token.hash(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_dedupes_and_drops_empty_tokens() {
        let set = IngredientSet::parse("  cheese,,,chicken  ,cheese, beef ").unwrap();
        assert_eq!(set.tokens(), ["cheese", "chicken", "beef"]);
    }

    #[test]
    fn identity_ignores_order_and_duplication() {
        let a = IngredientSet::parse("a,b,a").unwrap();
        let b = IngredientSet::parse("b,a").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_disallowed_characters() {
        let err = IngredientSet::parse("cheese,@chicken,beef!").unwrap_err();
        assert!(matches!(
            err,
            ForageError::InvalidIngredient(token) if token == "@chicken" || token == "beef!"
        ));
    }

    #[test]
    fn single_token_without_separator() {
        let set = IngredientSet::parse("  paprika  ").unwrap();
        assert_eq!(set.tokens(), ["paprika"]);
    }

    #[test]
    fn single_token_is_still_validated() {
        let err = IngredientSet::parse("paprika!").unwrap_err();
        assert!(matches!(err, ForageError::InvalidIngredient(_)));
    }

    #[test]
    fn splits_on_runs_of_mixed_separators() {
        let set = IngredientSet::parse(r#"beef--cheese~_"chicken"#).unwrap();
        assert_eq!(set.tokens(), ["beef", "cheese", "chicken"]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            IngredientSet::parse("   "),
            Err(ForageError::EmptyIngredients)
        ));
        assert!(matches!(
            IngredientSet::parse(",,, ,"),
            Err(ForageError::EmptyIngredients)
        ));
    }

    #[test]
    fn joined_uses_first_seen_order() {
        let set = IngredientSet::parse("cheese beef").unwrap();
        assert_eq!(set.joined(), "cheese,beef");
    }

    #[test]
    fn sorted_tokens_are_lexicographic() {
        let set = IngredientSet::parse("cheese,chicken,beef").unwrap();
        assert_eq!(set.sorted_tokens(), ["beef", "cheese", "chicken"]);
    }
}
