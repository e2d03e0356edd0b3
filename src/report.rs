use crate::{fetch::RepositoryResult, repos::RepositoryRef, tags};
use std::io::{self, Write};

pub const HEADER: [&str; 7] = [
    "name",
    "owner",
    "stars",
    "status",
    "description",
    "topics",
    "tags",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub name: String,
    pub owner: String,
    pub stars: u64,
    pub status: u16,
    pub description: String,
    pub topics: String,
    pub tags: String,
}

impl ReportRow {
    /// Found repositories use the names the host returned; missing ones
    /// fall back to the input's owner and name.
    pub fn new(repo: &RepositoryRef, result: RepositoryResult) -> Self {
        match result {
            RepositoryResult::Found {
                name,
                owner,
                stars,
                description,
                topics,
            } => Self {
                name,
                owner,
                stars,
                status: 200,
                tags: tags::infer_tags(&description),
                description,
                topics: topics.join(";"),
            },
            RepositoryResult::Missing { status } => Self {
                name: repo.name.clone(),
                owner: repo.owner.clone(),
                stars: 0,
                status,
                description: String::new(),
                topics: String::new(),
                tags: tags::FALLBACK_TAG.to_string(),
            },
        }
    }
}

/// Quote a field only when it needs it, doubling embedded quotes.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// CSV writer for report rows. Records end with `\r\n`.
pub struct ReportWriter<W: Write> {
    out: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(mut out: W) -> io::Result<Self> {
        write!(out, "{}\r\n", HEADER.join(","))?;
        Ok(Self { out })
    }

    pub fn write_row(&mut self, row: &ReportRow) -> io::Result<()> {
        write!(
            self.out,
            "{},{},{},{},{},{},{}\r\n",
            escape(&row.name),
            escape(&row.owner),
            row.stars,
            row.status,
            escape(&row.description),
            escape(&row.topics),
            escape(&row.tags)
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
