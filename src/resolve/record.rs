//! Resolution results.

use std::fmt;

/// Version control system named in a go-import tag.
///
/// The named variants are the systems the `go` tool knows about. Rules may
/// expand to any string, so unknown names are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Vcs {
    Bazaar,
    Fossil,
    Git,
    Mercurial,
    Subversion,
    Other(String),
}

impl Vcs {
    /// The token written into the go-import tag.
    pub fn as_str(&self) -> &str {
        match self {
            Vcs::Bazaar => "bzr",
            Vcs::Fossil => "fossil",
            Vcs::Git => "git",
            Vcs::Mercurial => "hg",
            Vcs::Subversion => "svn",
            Vcs::Other(name) => name,
        }
    }
}

impl From<String> for Vcs {
    fn from(name: String) -> Self {
        match name.as_str() {
            "bzr" => Vcs::Bazaar,
            "fossil" => Vcs::Fossil,
            "git" => Vcs::Git,
            "hg" => Vcs::Mercurial,
            "svn" => Vcs::Subversion,
            _ => Vcs::Other(name),
        }
    }
}

impl From<&str> for Vcs {
    fn from(name: &str) -> Self {
        Vcs::from(name.to_string())
    }
}

impl fmt::Display for Vcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The repository a module path resolved to.
///
/// Built fresh for every request from the first matching rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Module path prefix the repository corresponds to.
    pub root: String,
    pub vcs: Vcs,
    /// Where the VCS tool should fetch from.
    pub repo_url: String,
}
