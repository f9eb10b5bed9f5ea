use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::ConfigValidationError;

/// Maps paths matching `from` (a regular expression) onto `to`, which may
/// reference capture groups as `$1` or `${name}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RewriteRule {
    pub from: String,
    pub to: String,
}

/// Translates event paths into the path convention of a target. The first
/// rule whose pattern matches wins; paths matching no rule pass through.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    rules: Vec<(Regex, String)>,
}

impl Rewriter {
    pub fn new(rules: &[RewriteRule]) -> Result<Self, ConfigValidationError> {
        let rules = rules
            .iter()
            .map(|rule| {
                Regex::new(&rule.from)
                    .map(|re| (re, rule.to.clone()))
                    .map_err(|err| ConfigValidationError::InvalidRewrite {
                        pattern: rule.from.clone(),
                        reason: err.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }

    pub fn identity() -> Self {
        Self::default()
    }

    pub fn rewrite(&self, input: &str) -> String {
        for (pattern, replacement) in &self.rules {
            if pattern.is_match(input) {
                return pattern.replace_all(input, replacement.as_str()).into_owned();
            }
        }
        input.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(from: &str, to: &str) -> RewriteRule {
        RewriteRule {
            from: from.into(),
            to: to.into(),
        }
    }

    #[test]
    fn identity_leaves_paths_untouched() {
        let rewriter = Rewriter::identity();
        assert_eq!(rewriter.rewrite("/data/movies/Heat (1995)"), "/data/movies/Heat (1995)");
    }

    #[test]
    fn first_matching_rule_wins() {
        let rewriter = Rewriter::new(&[
            rule("^/mnt/unionfs/Media/", "/data/"),
            rule("^/mnt/", "/other/"),
        ])
        .expect("valid rules");

        assert_eq!(
            rewriter.rewrite("/mnt/unionfs/Media/Movies/Heat (1995)"),
            "/data/Movies/Heat (1995)"
        );
        assert_eq!(rewriter.rewrite("/mnt/local/TV"), "/other/local/TV");
        assert_eq!(rewriter.rewrite("/srv/TV"), "/srv/TV");
    }

    #[test]
    fn capture_groups_expand_in_replacement() {
        let rewriter =
            Rewriter::new(&[rule("^/mnt/(?P<kind>movies|tv)/", "/data/${kind}/")]).expect("valid rule");
        assert_eq!(rewriter.rewrite("/mnt/tv/Severance/Season 1"), "/data/tv/Severance/Season 1");
    }

    #[test]
    fn invalid_pattern_is_a_config_error() {
        let err = Rewriter::new(&[rule("^/mnt/(", "/data/")]).expect_err("should fail");
        assert!(matches!(err, ConfigValidationError::InvalidRewrite { ref pattern, .. } if pattern == "^/mnt/("));
    }
}
