use std::collections::HashMap;
use tracing::debug;

use super::CompiledRoute;

impl CompiledRoute {
    /// Build the literal URL for this template from parameter values.
    ///
    /// `params` is keyed by placeholder name, or by position (`"1"`, `"2"`, ...)
    /// for unnamed placeholders. Generation is all-or-nothing: every placeholder
    /// needs exactly one value that matches its type and quantifier, and no
    /// other keys may be supplied.
    ///
    /// # Returns
    ///
    /// * `Some(url)` - the template with every token replaced by its value
    /// * `None` - arity mismatch, a missing key, a value failing its type or
    ///   length check, or a token that could not be substituted
    ///
    /// # Example
    ///
    /// ```rust
    /// use routeforge::compile;
    ///
    /// let route = compile("/blog/(id:digit)").unwrap();
    /// assert_eq!(route.reverse([("id", "42")]).as_deref(), Some("/blog/42"));
    /// assert_eq!(route.reverse([("id", "abc")]), None);
    /// ```
    #[must_use]
    pub fn reverse<I, K, V>(&self, params: I) -> Option<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut supplied = 0;
        let params: HashMap<String, String> = params
            .into_iter()
            .inspect(|_| supplied += 1)
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();

        if supplied != params.len() {
            debug!(
                template = %self.template,
                supplied = supplied,
                distinct = params.len(),
                "Reverse failed: a parameter was supplied more than once"
            );
            return None;
        }
        if params.len() != self.tokens.len() {
            debug!(
                template = %self.template,
                expected = self.tokens.len(),
                supplied = params.len(),
                "Reverse failed: parameter count mismatch"
            );
            return None;
        }
        if self.tokens.is_empty() {
            return Some(self.template.clone());
        }

        let mut url = self.template.clone();
        let mut replaced = 0;
        // Search resumes after the previous substitution so inserted values are never rescanned.
        let mut cursor = 0;

        for (token, validator) in self.tokens.iter().zip(&self.validators) {
            let Some(value) = params.get(token.key()) else {
                debug!(
                    template = %self.template,
                    placeholder = %token.key(),
                    "Reverse failed: no value for placeholder"
                );
                return None;
            };

            if !validator.is_match(value) {
                debug!(
                    template = %self.template,
                    placeholder = %token.key(),
                    value = %value,
                    type_name = %token.type_name(),
                    "Reverse failed: value does not match placeholder type"
                );
                return None;
            }

            // Fixed-shape types are fully constrained by their pattern.
            if token.placeholder_type().is_repeatable()
                && !token.quantifier().accepts_len(value.chars().count())
            {
                debug!(
                    template = %self.template,
                    placeholder = %token.key(),
                    value = %value,
                    quantifier = %token.raw_quantifier(),
                    "Reverse failed: value length outside quantifier bounds"
                );
                return None;
            }

            if let Some(offset) = url[cursor..].find(token.literal()) {
                let at = cursor + offset;
                url.replace_range(at..at + token.literal().len(), value);
                cursor = at + value.len();
                replaced += 1;
            }
        }

        if replaced != self.tokens.len() {
            debug!(
                template = %self.template,
                replaced = replaced,
                expected = self.tokens.len(),
                "Reverse failed: not every placeholder was substituted"
            );
            return None;
        }
        Some(url)
    }
}
