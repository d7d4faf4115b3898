use std::{collections::BTreeSet, sync::LazyLock};

use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Deserializer, Serialize};

use crate::entry::ContentKind;

// yaml block delimited by `---` lines at the very top of the file
static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\A---[ \t]*\r?\n(.*?)^---[ \t]*(?:\r?\n|\z)(.*)")
        .dot_matches_new_line(true)
        .multi_line(true)
        .build()
        .expect("frontmatter pattern is valid")
});

/// Split a content file into its raw frontmatter block and the body after it.
///
/// Returns `None` when the file does not start with a `---` delimited block.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let caps = HEADER_PATTERN.captures(content)?;
    let header = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());
    Some((header, body))
}

/// Frontmatter of `posts/*.mdx`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostFrontmatter {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub published_date: DateTime<Utc>,
    pub tag: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
}

/// Frontmatter of `works/*.mdx`. Same shape as a post, minus the series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkFrontmatter {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub published_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default)]
    pub published: bool,
}

/// Frontmatter of the newer `blog` collection, which carries a tag set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BlogFrontmatter {
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub publish_date: DateTime<Utc>,
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(rename = "type")]
    pub category: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Frontmatter {
    Post(PostFrontmatter),
    Work(WorkFrontmatter),
    Blog(BlogFrontmatter),
}

impl Frontmatter {
    /// Parse a raw yaml block with the schema of the given collection.
    pub fn parse(kind: ContentKind, header: &str) -> anyhow::Result<Self> {
        let frontmatter = match kind {
            ContentKind::Posts => Self::Post(serde_yaml::from_str(header)?),
            ContentKind::Works => Self::Work(serde_yaml::from_str(header)?),
            ContentKind::Blog => Self::Blog(serde_yaml::from_str(header)?),
        };
        Ok(frontmatter)
    }
}

/// Accepts a plain date or a timestamp and returns the moment it names.
///
/// A plain date is midnight UTC. Timestamps without an offset are read as UTC.
pub(crate) fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|datetime| datetime.and_utc())
        .with_context(|| format!("Invalid date format: {value:?}"))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
