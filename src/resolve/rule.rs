//! A single resolution rule.

use regex::Regex;

use crate::resolve::record::{Record, Vcs};
use crate::resolve::template::expand;

/// A module path pattern paired with the templates that build a [`Record`].
///
/// The pattern is compiled when the rule is built, so an invalid pattern is
/// always a load-time error. Rules are never modified afterwards.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    root_template: String,
    vcs_template: String,
    repo_url_template: String,
}

impl Rule {
    /// Compile `pattern` and build a rule from it.
    pub fn new(
        pattern: &str,
        root_template: impl Into<String>,
        vcs_template: impl Into<String>,
        repo_url_template: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self::from_regex(
            Regex::new(pattern)?,
            root_template,
            vcs_template,
            repo_url_template,
        ))
    }

    /// Build a rule from an already compiled pattern.
    pub fn from_regex(
        pattern: Regex,
        root_template: impl Into<String>,
        vcs_template: impl Into<String>,
        repo_url_template: impl Into<String>,
    ) -> Self {
        Self {
            pattern,
            root_template: root_template.into(),
            vcs_template: vcs_template.into(),
            repo_url_template: repo_url_template.into(),
        }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn root_template(&self) -> &str {
        &self.root_template
    }

    pub fn vcs_template(&self) -> &str {
        &self.vcs_template
    }

    pub fn repo_url_template(&self) -> &str {
        &self.repo_url_template
    }

    /// Match `subject` and, on success, expand the templates.
    ///
    /// The match is unanchored unless the pattern itself anchors; the
    /// leftmost-first match supplies the capture groups.
    pub fn apply(&self, subject: &str) -> Option<Record> {
        let captures = self.pattern.captures(subject)?;
        Some(Record {
            root: expand(&self.root_template, &captures),
            vcs: Vcs::from(expand(&self.vcs_template, &captures)),
            repo_url: expand(&self.repo_url_template, &captures),
        })
    }
}
