//! Glob-style selection of item paths

use crate::error::MenuError;
use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

#[derive(Debug, Clone)]
struct FilterPattern {
    pattern: Pattern,
    negated: bool,
}

/// An ordered list of glob patterns deciding which items take part
///
/// Patterns are applied in order: a plain pattern selects the paths it
/// matches, a pattern starting with `!` removes them again.
#[derive(Debug, Clone)]
pub struct Filter {
    // None behaves like the single pattern `**`
    patterns: Option<Vec<FilterPattern>>,
}

impl Default for Filter {
    fn default() -> Self {
        Self::all()
    }
}

impl Filter {
    /// Compile the given patterns, failing with `InvalidOptions` on bad syntax
    pub fn new<I, S>(patterns: I) -> Result<Self, MenuError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|source| {
                let source = source.as_ref();
                let (negated, glob) = match source.strip_prefix('!') {
                    Some(rest) => (true, rest),
                    None => (false, source),
                };
                let pattern = Pattern::new(glob).map_err(|e| {
                    MenuError::options(format!("invalid filter pattern {:?}: {}", source, e))
                })?;
                Ok(FilterPattern { pattern, negated })
            })
            .collect::<Result<Vec<_>, MenuError>>()?;

        Ok(Self {
            patterns: Some(patterns),
        })
    }

    /// A filter selecting every path without a hidden component, same as
    /// the single pattern `**`
    pub fn all() -> Self {
        Self { patterns: None }
    }

    pub fn matches(&self, path: &str) -> bool {
        let Some(patterns) = &self.patterns else {
            return !path.split('/').any(|part| part.starts_with('.'));
        };

        let mut selected = false;
        for p in patterns {
            if p.negated == selected && p.pattern.matches_with(path, MATCH_OPTIONS) {
                selected = !p.negated;
            }
        }
        selected
    }
}
