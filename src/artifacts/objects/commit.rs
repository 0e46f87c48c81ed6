//! Commit object
//!
//! Commits record a snapshot of the staged files. They contain:
//! - A tree object ID
//! - An optional parent commit ID (history is strictly linear)
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp>
//! committer <name> <email> <timestamp>
//!
//! <commit message>
//! ```
//!
//! The `parent` line is present only when the commit has a parent.
//! Timestamps are Unix epoch seconds.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::KitError;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::io::BufRead;
use std::sync::LazyLock;

const DEFAULT_AUTHOR_NAME: &str = "kit";
const DEFAULT_AUTHOR_EMAIL: &str = "kit@localhost";

static TREE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^tree ([0-9a-fA-F]{40})$").expect("valid regex"));
static PARENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^parent ([0-9a-fA-F]{40})$").expect("valid regex"));
static PERSON_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(author|committer) (.*) <([^<>]*)> (-?\d+)$").expect("valid regex")
});

/// Author or committer information
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<Utc>,
}

impl Author {
    /// Create a new author with the current timestamp
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: Utc::now(),
        }
    }

    /// Create a new author with a specific timestamp
    ///
    /// Sub-second precision is dropped, matching what the on-disk format can hold.
    pub fn new_with_timestamp(name: String, email: String, timestamp: DateTime<Utc>) -> Self {
        let timestamp = DateTime::from_timestamp(timestamp.timestamp(), 0).unwrap_or(timestamp);

        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Load author information from environment variables
    ///
    /// Reads KIT_AUTHOR_NAME, KIT_AUTHOR_EMAIL, and optionally KIT_AUTHOR_DATE.
    /// Missing identity falls back to a fixed default; a missing or
    /// unparsable date falls back to the current time. Angle brackets and
    /// line breaks are stripped from the identity so the header line stays
    /// parsable.
    pub fn load_from_env() -> Self {
        let name = Self::sanitize_identity(std::env::var("KIT_AUTHOR_NAME").ok(), DEFAULT_AUTHOR_NAME);
        let email =
            Self::sanitize_identity(std::env::var("KIT_AUTHOR_EMAIL").ok(), DEFAULT_AUTHOR_EMAIL);
        let timestamp = std::env::var("KIT_AUTHOR_DATE")
            .ok()
            .and_then(|date| Self::parse_date(&date));

        match timestamp {
            Some(ts) => Author::new_with_timestamp(name, email, ts),
            None => Author::new(name, email),
        }
    }

    fn sanitize_identity(value: Option<String>, default: &str) -> String {
        let value = value
            .unwrap_or_default()
            .chars()
            .filter(|c| !matches!(c, '<' | '>' | '\n' | '\r'))
            .collect::<String>();

        match value.trim() {
            "" => default.to_string(),
            trimmed => trimmed.to_string(),
        }
    }

    fn parse_date(date: &str) -> Option<DateTime<Utc>> {
        let date = date.trim();

        DateTime::parse_from_rfc2822(date)
            .or_else(|_| DateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S %z"))
            .map(|ts| ts.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                date.parse::<i64>()
                    .ok()
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))
            })
    }

    /// "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// "Name <email> timestamp", as written in the commit body
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {}",
            self.name,
            self.email,
            self.timestamp.timestamp()
        )
    }

    /// Timestamp rendered in UTC, e.g. "2024-01-01 12:34:56 UTC"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

impl TryFrom<&str> for Author {
    type Error = KitError;

    /// Parses a full `author ...` or `committer ...` header line
    fn try_from(line: &str) -> Result<Self, Self::Error> {
        let captures = PERSON_LINE
            .captures(line)
            .ok_or_else(|| KitError::CorruptObject(format!("invalid person line '{line}'")))?;

        let timestamp = captures[4]
            .parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .ok_or_else(|| KitError::CorruptObject(format!("invalid timestamp in '{line}'")))?;

        Ok(Author {
            name: captures[2].to_string(),
            email: captures[3].to_string(),
            timestamp,
        })
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    tree_oid: ObjectId,
    parent: Option<ObjectId>,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    /// Create a new commit; the author is also recorded as committer
    pub fn new(parent: Option<ObjectId>, tree_oid: ObjectId, author: Author, message: String) -> Self {
        Commit {
            tree_oid,
            parent,
            author: author.clone(),
            committer: author,
            message,
        }
    }

    /// First line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn committer(&self) -> &Author {
        &self.committer
    }

    fn body(&self) -> String {
        let mut lines = vec![format!("tree {}", self.tree_oid)];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        let mut body = lines.join("\n");
        body.push('\n');
        body
    }
}

impl Packable for Commit {
    fn serialize(&self) -> crate::errors::Result<Bytes> {
        Ok(Bytes::from(self.body()))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> crate::errors::Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|e| KitError::CorruptObject(format!("commit body: {e}")))?;

        let (header, message) = content
            .split_once("\n\n")
            .ok_or_else(|| KitError::CorruptObject("commit without message separator".into()))?;

        let mut tree_oid = None;
        let mut parent = None;
        let mut author = None;
        let mut committer = None;

        for line in header.lines() {
            if let Some(captures) = TREE_LINE.captures(line) {
                tree_oid = Some(ObjectId::try_parse(captures[1].to_string())?);
            } else if let Some(captures) = PARENT_LINE.captures(line) {
                parent = Some(ObjectId::try_parse(captures[1].to_string())?);
            } else if line.starts_with("author ") {
                author = Some(Author::try_from(line)?);
            } else if line.starts_with("committer ") {
                committer = Some(Author::try_from(line)?);
            } else {
                return Err(KitError::CorruptObject(format!(
                    "unexpected commit header line '{line}'"
                )));
            }
        }

        let tree_oid =
            tree_oid.ok_or_else(|| KitError::CorruptObject("commit without tree".into()))?;
        let author = author.ok_or_else(|| KitError::CorruptObject("commit without author".into()))?;
        let committer = committer.unwrap_or_else(|| author.clone());
        let message = message.strip_suffix('\n').unwrap_or(message).to_string();

        Ok(Commit {
            tree_oid,
            parent,
            author,
            committer,
            message,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        self.body().trim_end_matches('\n').to_string()
    }
}
