//! Rule-set loading.
//!
//! # File Format
//! ```text
//! # comment
//! <pattern> <root template> <vcs template> <repo URL template>
//! ```
//! Lines are trimmed; blank lines and `#` comments are skipped. Every other
//! line must have exactly four whitespace-separated fields. Patterns use the
//! `regex` crate syntax and may not contain whitespace.
//!
//! # Design Decisions
//! - Any malformed line aborts loading; a partial rule set is never served
//! - A rule file without a single rule is an error, never an empty resolver
//! - Patterns are compiled here, so the resolver never sees a bad pattern
//! - The built-in default is a process-wide immutable value

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::config::schema::ResolverConfig;
use crate::resolve::Rule;

/// Pattern of the built-in rule: `host[:port]/owner/name[/...]`.
pub const DEFAULT_PATTERN: &str = r"^([^/:]+)(?::[^/]+)?/([^/]+/[^/]+)(?:/.+)?";

static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![Rule::new(DEFAULT_PATTERN, "$1/$2", "git", "ssh://git@$1/$2")
        .expect("built-in rule pattern is valid")]
});

/// GitHub-style default: the first path segment is the host (port
/// stripped), the next two are the repository, served over git+ssh.
pub fn default_rules() -> &'static [Rule] {
    &DEFAULT_RULES
}

/// Errors raised while building a rule set. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read rules: {0}")]
    Read(#[from] io::Error),

    #[error("line {line_no}: expected four fields but got {count}: {line}")]
    FieldCount {
        line_no: usize,
        count: usize,
        line: String,
    },

    #[error("line {line_no}: invalid pattern: {source}")]
    Pattern {
        line_no: usize,
        #[source]
        source: regex::Error,
    },

    #[error("rule file {path} contains no rules")]
    Empty { path: PathBuf },
}

/// Read rules from a file. The file must hold at least one rule.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let rules = read_rules(BufReader::new(file))?;
    if rules.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(rules)
}

/// Read lines of rules from a reader.
pub fn read_rules<R: BufRead>(reader: R) -> Result<Vec<Rule>, LoadError> {
    let mut rules = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no = index + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [pattern, root, vcs, repo_url] = fields[..] else {
            return Err(LoadError::FieldCount {
                line_no,
                count: fields.len(),
                line: line.to_string(),
            });
        };

        let rule = Rule::new(pattern, root, vcs, repo_url)
            .map_err(|source| LoadError::Pattern { line_no, source })?;
        rules.push(rule);
    }

    Ok(rules)
}

/// Parse rules from in-memory text.
pub fn parse_rules(text: &str) -> Result<Vec<Rule>, LoadError> {
    read_rules(text.as_bytes())
}

/// Build the rule set named by the configuration.
///
/// An unset or empty `rule_file` selects [`default_rules`].
pub fn load_rule_set(config: &ResolverConfig) -> Result<Vec<Rule>, LoadError> {
    match config
        .rule_file
        .as_deref()
        .filter(|path| !path.as_os_str().is_empty())
    {
        Some(path) => {
            let rules = load_rules(path)?;
            tracing::info!(path = %path.display(), rules = rules.len(), "Rule file loaded");
            Ok(rules)
        }
        None => {
            tracing::info!("No rule file, using GitHub-style default rule");
            Ok(default_rules().to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::Vcs;
    use std::io::Write;

    #[test]
    fn test_default_rule_templates() {
        let rules = default_rules();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].pattern().as_str(), DEFAULT_PATTERN);
        assert_eq!(rules[0].root_template(), "$1/$2");
        assert_eq!(rules[0].vcs_template(), "git");
        assert_eq!(rules[0].repo_url_template(), "ssh://git@$1/$2");
    }

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let rules = parse_rules(
            "# company rules\n\
             \n\
             \t  # indented comment\n\
             ^hg\\.example\\.com/(\\w+)  hg.example.com/$1  hg  https://hg.example.com/$1\n\
             \n\
             ^([^/]+)/(\\w+/\\w+)\t$1/$2\tgit\thttps://$1/$2.git   \n",
        )
        .unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].vcs_template(), "hg");
        assert_eq!(rules[1].repo_url_template(), "https://$1/$2.git");

        let record = rules[1].apply("code.example.com/a/b").unwrap();
        assert_eq!(record.vcs, Vcs::Git);
        assert_eq!(record.repo_url, "https://code.example.com/a/b.git");
    }

    #[test]
    fn test_three_fields_rejected() {
        let err = parse_rules("# header\n^x/(.*) x/$1 git\n").unwrap_err();
        match &err {
            LoadError::FieldCount { line_no, count, line } => {
                assert_eq!(*line_no, 2);
                assert_eq!(*count, 3);
                assert_eq!(line, "^x/(.*) x/$1 git");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(
            err.to_string(),
            "line 2: expected four fields but got 3: ^x/(.*) x/$1 git"
        );
    }

    #[test]
    fn test_five_fields_rejected() {
        let err = parse_rules("a b c d e\n").unwrap_err();
        assert!(matches!(err, LoadError::FieldCount { count: 5, .. }));
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = parse_rules("^ok$ a git b\n^(broken a git b\n").unwrap_err();
        assert!(matches!(err, LoadError::Pattern { line_no: 2, .. }));
    }

    #[test]
    fn test_comment_only_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# only comments\n\n   \n# nothing else").unwrap();

        let err = load_rules(file.path()).unwrap_err();
        match &err {
            LoadError::Empty { path } => assert_eq!(path, file.path()),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().ends_with("contains no rules"));
    }

    #[test]
    fn test_empty_file_rejected_by_rule_set() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = ResolverConfig {
            rule_file: Some(file.path().to_path_buf()),
            ..ResolverConfig::default()
        };
        assert!(matches!(load_rule_set(&config), Err(LoadError::Empty { .. })));
    }

    #[test]
    fn test_load_rules_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "^svn\\.example\\.com/(\\w+) svn.example.com/$1 svn svn://svn.example.com/$1").unwrap();

        let rules = load_rules(file.path()).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].vcs_template(), "svn");
    }

    #[test]
    fn test_load_rules_missing_file() {
        let err = load_rules(Path::new("/nonexistent/rules.txt")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/rules.txt"));
    }

    #[test]
    fn test_rule_set_selection() {
        let config = ResolverConfig::default();
        assert_eq!(load_rule_set(&config).unwrap().len(), 1);

        let config = ResolverConfig {
            rule_file: Some(PathBuf::new()),
            ..ResolverConfig::default()
        };
        let rules = load_rule_set(&config).unwrap();
        assert_eq!(rules[0].pattern().as_str(), DEFAULT_PATTERN);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "^a/(b) a/$1 fossil https://a/$1\n^c/(d) c/$1 bzr https://c/$1").unwrap();
        let config = ResolverConfig {
            rule_file: Some(file.path().to_path_buf()),
            ..ResolverConfig::default()
        };
        let rules = load_rule_set(&config).unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[1].vcs_template(), "bzr");
    }
}
