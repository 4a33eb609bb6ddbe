//! File-backed visit log.
//!
//! Each record is one human-readable block of `Key: value` lines closed by a
//! rule line. Values are escaped so a block never spans more lines than it
//! has fields.

use crate::{
    error::StoreError,
    models::{AgentSummary, VisitRecord},
    services::store::LogStore,
};
use async_trait::async_trait;
use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

/// Line that terminates every record block
pub const RULE_LINE: &str = "==================================================";

const HEADER_INDENT: &str = "  ";

/// Append-only text file store
#[derive(Debug, Clone)]
pub struct FileLogStore {
    path: PathBuf,
}

impl FileLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl LogStore for FileLogStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn append(&self, record: &VisitRecord) -> Result<(), StoreError> {
        // The whole block goes out in one write so concurrent appends are
        // unlikely to interleave.
        let block = format_record(record);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(block.as_bytes()).await?;
        // tokio only reports a failed background write on flush
        file.flush().await?;
        file.sync_data().await?;

        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<VisitRecord>, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::LogNotFound),
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(parse_records(&contents))
    }
}

/// Render one record as a log block, rule line included
pub fn format_record(record: &VisitRecord) -> String {
    let mut block = String::new();
    push_field(&mut block, "Timestamp", &record.timestamp);
    push_field(&mut block, "IP", &record.ip);
    push_field(&mut block, "Method", &record.method);
    push_field(&mut block, "Path", &record.path);
    push_field(&mut block, "URL", &record.url);
    if let Some(referrer) = &record.referrer {
        push_field(&mut block, "Referrer", referrer);
    }
    push_field(&mut block, "User-Agent", &record.user_agent);
    if let Some(location) = &record.location {
        push_field(&mut block, "Location", location);
    }
    if let Some(agent) = &record.agent {
        push_field(&mut block, "Agent", &agent.display_line());
    }
    block.push_str("Headers:\n");
    for (name, value) in &record.headers {
        block.push_str(HEADER_INDENT);
        push_field(&mut block, name, value);
    }
    block.push_str(RULE_LINE);
    block.push('\n');
    block
}

fn push_field(block: &mut String, key: &str, value: &str) {
    block.push_str(key);
    block.push_str(": ");
    block.push_str(&escape_value(value));
    block.push('\n');
}

/// Parse every well-formed block in a log file
pub fn parse_records(contents: &str) -> Vec<VisitRecord> {
    let mut records = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in contents.lines() {
        if line == RULE_LINE {
            match parse_block(&block) {
                Some(record) => records.push(record),
                None => tracing::warn!(lines = block.len(), "Skipping malformed visitor log block"),
            }
            block.clear();
        } else {
            block.push(line);
        }
    }

    if block.iter().any(|line| !line.trim().is_empty()) {
        tracing::warn!(lines = block.len(), "Ignoring unterminated trailing visitor log block");
    }

    records
}

fn parse_block(lines: &[&str]) -> Option<VisitRecord> {
    let mut fields: BTreeMap<&str, String> = BTreeMap::new();
    let mut headers = BTreeMap::new();
    let mut in_headers = false;

    for line in lines.iter().filter(|line| !line.is_empty()) {
        if *line == "Headers:" {
            in_headers = true;
            continue;
        }
        if in_headers && let Some(header_line) = line.strip_prefix(HEADER_INDENT) {
            let (name, value) = split_field(header_line)?;
            headers.insert(name.to_string(), value);
            continue;
        }
        in_headers = false;
        let (key, value) = split_field(line)?;
        fields.insert(key, value);
    }

    let mut take = |key: &str| fields.remove(key);

    Some(VisitRecord {
        timestamp: take("Timestamp")?,
        ip: take("IP")?,
        method: take("Method").unwrap_or_default(),
        path: take("Path").unwrap_or_default(),
        url: take("URL").unwrap_or_default(),
        referrer: take("Referrer"),
        user_agent: take("User-Agent").unwrap_or_default(),
        location: take("Location"),
        agent: take("Agent").and_then(|line| AgentSummary::parse_line(&line)),
        headers,
    })
}

fn split_field(line: &str) -> Option<(&str, String)> {
    let (key, value) = line.split_once(':')?;
    let value = value.strip_prefix(' ').unwrap_or(value);
    Some((key, unescape_value(value)))
}

fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn unescape_value(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some('\\') => unescaped.push('\\'),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}
