use super::session::ReconciledSession;
use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free set of canonical room codes.
///
/// Free-text locations from the log are mapped onto a code by substring
/// containment; the first code (in set order) that matches wins. A set built
/// from the observed locations matches whole strings only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSet {
    codes: Vec<String>,
    #[serde(default)]
    exact: bool,
}

impl LocationSet {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for c in codes {
            let c = c.into().trim().to_string();
            if !c.is_empty() && !out.contains(&c) {
                out.push(c);
            }
        }
        Self {
            codes: out,
            exact: false,
        }
    }

    /// Distinct location strings as they appear in the sessions.
    pub fn observed(sessions: &[ReconciledSession]) -> Self {
        let mut locs: Vec<&str> = sessions.iter().map(|s| s.location.as_str()).collect();
        locs.sort_unstable();
        Self {
            exact: true,
            ..Self::new(locs)
        }
    }

    /// Parse a comma-separated list ("014,015").
    pub fn from_csv_list(s: &str) -> Self {
        Self::new(s.split(','))
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn canonical(&self, location: &str) -> Option<&str> {
        self.codes
            .iter()
            .find(|code| {
                if self.exact {
                    location.trim() == code.as_str()
                } else {
                    location.contains(code.as_str())
                }
            })
            .map(String::as_str)
    }
}
