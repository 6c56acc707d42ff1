//! Project status sentences.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::errors::HqError;
use crate::timestamp;

/// Shown for a project with no (usable) status.
pub const EMPTY_SENTENCE: &str = "No status yet.";

/// Longest sentence kept, in characters.
pub const MAX_SENTENCE_CHARS: usize = 220;

/// The four tracked projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Project {
    Qualiver,
    Echo,
    Kuenti,
    Personal,
}

impl Project {
    pub const ALL: [Project; 4] = [
        Project::Qualiver,
        Project::Echo,
        Project::Kuenti,
        Project::Personal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Project::Qualiver => "qualiver",
            Project::Echo => "echo",
            Project::Kuenti => "kuenti",
            Project::Personal => "personal",
        }
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Project {
    type Err = HqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| HqError::UnknownProject(s.to_string()))
    }
}

/// Normalize a status sentence.
///
/// Whitespace runs collapse to one space, the ends are trimmed, and the
/// result is cut to [`MAX_SENTENCE_CHARS`].  Blank input gives
/// [`EMPTY_SENTENCE`].
pub fn sanitize(input: &str) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return EMPTY_SENTENCE.to_string();
    }
    collapsed.chars().take(MAX_SENTENCE_CHARS).collect()
}

/// [`sanitize`] for untrusted JSON: anything but a string is blank.
pub fn sanitize_value(input: Option<&Value>) -> String {
    match input.and_then(Value::as_str) {
        Some(s) => sanitize(s),
        None => EMPTY_SENTENCE.to_string(),
    }
}

/// Contents of `hq-status.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDocument {
    pub qualiver: String,
    pub echo: String,
    pub kuenti: String,
    pub personal: String,

    #[serde(serialize_with = "timestamp::serialize")]
    pub updated_at: DateTime<Utc>,

    #[serde(serialize_with = "timestamp::serialize_map")]
    pub field_updated_at: BTreeMap<Project, DateTime<Utc>>,
}

impl Default for StatusDocument {
    fn default() -> Self {
        Self {
            qualiver: EMPTY_SENTENCE.to_string(),
            echo: EMPTY_SENTENCE.to_string(),
            kuenti: EMPTY_SENTENCE.to_string(),
            personal: EMPTY_SENTENCE.to_string(),
            updated_at: timestamp::epoch(),
            field_updated_at: BTreeMap::new(),
        }
    }
}

impl StatusDocument {
    /// Build a document from parsed JSON, re-sanitizing every sentence.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        let mut doc = Self {
            updated_at: timestamp::parse_or_epoch(obj.get("updatedAt").and_then(Value::as_str)),
            ..Self::default()
        };

        for project in Project::ALL {
            *doc.slot_mut(project) = sanitize_value(obj.get(project.as_str()));
        }

        if let Some(stamps) = obj.get("fieldUpdatedAt").and_then(Value::as_object) {
            for project in Project::ALL {
                let ts = stamps
                    .get(project.as_str())
                    .and_then(Value::as_str)
                    .and_then(timestamp::parse);
                if let Some(ts) = ts {
                    doc.field_updated_at.insert(project, ts);
                }
            }
        }

        doc
    }

    /// The sentence for `project`.
    pub fn get(&self, project: Project) -> &str {
        match project {
            Project::Qualiver => &self.qualiver,
            Project::Echo => &self.echo,
            Project::Kuenti => &self.kuenti,
            Project::Personal => &self.personal,
        }
    }

    /// When `project` was last written.
    pub fn field_updated_at(&self, project: Project) -> Option<DateTime<Utc>> {
        self.field_updated_at.get(&project).copied()
    }

    fn slot_mut(&mut self, project: Project) -> &mut String {
        match project {
            Project::Qualiver => &mut self.qualiver,
            Project::Echo => &mut self.echo,
            Project::Kuenti => &mut self.kuenti,
            Project::Personal => &mut self.personal,
        }
    }

    /// Apply `update` at `now`.  Every listed project is stamped, even when
    /// its sanitized sentence is unchanged.
    pub(crate) fn apply(&mut self, update: &StatusUpdate, now: DateTime<Utc>) {
        if update.is_empty() {
            return;
        }
        for (project, raw) in &update.sentences {
            *self.slot_mut(*project) = sanitize(raw);
            self.field_updated_at.insert(*project, now);
        }
        self.updated_at = now;
    }
}

/// Raw sentences for some of the projects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusUpdate {
    sentences: BTreeMap<Project, String>,
}

impl StatusUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, project: Project, sentence: impl Into<String>) -> Self {
        self.sentences.insert(project, sentence.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}
