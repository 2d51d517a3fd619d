use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

const FIELD_COUNT: usize = 7;

/// One `name:password:uid:gid:comment:home:shell` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswdEntry {
    pub username: String,
    pub user_id: u32,
    pub group_id: u32,
    /// GECOS comment, usually the user's real name.
    pub name: String,
    pub home: String,
    pub shell: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passwd {
    entries: Vec<PasswdEntry>,
}

impl Passwd {
    pub fn read(path: &Path) -> Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Lines that are not exactly seven fields, or whose ids are not
    /// numeric, are skipped.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .filter_map(parse_entry)
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[PasswdEntry] {
        &self.entries
    }

    pub fn find_by_username(&self, username: &str) -> Option<&PasswdEntry> {
        self.entries.iter().find(|entry| entry.username == username)
    }

    pub fn find_by_user_id(&self, user_id: u32) -> Option<&PasswdEntry> {
        self.entries.iter().find(|entry| entry.user_id == user_id)
    }
}

fn parse_entry(line: &str) -> Option<PasswdEntry> {
    let fields: Vec<&str> = line.split(':').collect();
    if fields.len() != FIELD_COUNT {
        return None;
    }

    Some(PasswdEntry {
        username: fields[0].to_string(),
        user_id: fields[2].trim().parse().ok()?,
        group_id: fields[3].trim().parse().ok()?,
        name: fields[4].to_string(),
        home: fields[5].to_string(),
        shell: fields[6].trim_end().to_string(),
    })
}
