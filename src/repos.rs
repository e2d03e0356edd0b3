use log::warn;
use std::{fmt, fs, path::Path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

impl RepositoryRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parsed input list: repositories in input order plus the lines that
/// could not be read as a repository URL.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RepositoryList {
    pub repos: Vec<RepositoryRef>,
    pub skipped: Vec<String>,
}

/// Take the last two path segments of `url` as owner and name.
pub fn parse_line(url: &str) -> Option<RepositoryRef> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let name = segments.next()?;
    let owner = segments.next()?;
    Some(RepositoryRef::new(owner, name))
}

/// Parse a newline-delimited URL list, in order. Blank lines are ignored.
pub fn parse_list(content: &str) -> RepositoryList {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut res = RepositoryList::default();
    for line in content.lines() {
        let url = line.trim();
        if url.is_empty() {
            continue;
        }
        match parse_line(url) {
            Some(repo) => res.repos.push(repo),
            None => res.skipped.push(url.to_string()),
        }
    }
    res
}

/// Read the URL list at `path`, logging one notice per skipped line.
pub fn load(path: &Path) -> std::io::Result<Vec<RepositoryRef>> {
    let content = fs::read_to_string(path)?;
    let list = parse_list(&content);
    for url in &list.skipped {
        warn!("Skipping invalid URL: {url}");
    }
    Ok(list.repos)
}
