use std::{fmt, path::PathBuf, str::FromStr};

use anyhow::bail;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::frontmatter::Frontmatter;

/// The content collections of the site.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Posts,
    Works,
    Blog,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [Self::Posts, Self::Works, Self::Blog];

    /// Directory of the collection below the content root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Works => "works",
            Self::Blog => "blog",
        }
    }

    pub(crate) fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Posts | Self::Works => &["mdx"],
            Self::Blog => &["md", "mdx"],
        }
    }

    /// Whether entries may live in nested directories.
    pub(crate) fn recursive(self) -> bool {
        matches!(self, Self::Blog)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "posts" | "post" => Ok(Self::Posts),
            "works" | "work" => Ok(Self::Works),
            "blog" => Ok(Self::Blog),
            _ => bail!("Unknown content kind: {s}"),
        }
    }
}

/// One loaded content item. Never mutated after load.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: ContentKind,
    /// Path below the collection directory, without extension.
    pub slug: String,
    pub path: PathBuf,
    pub frontmatter: Frontmatter,
    #[serde(skip_serializing)]
    pub body: String,
}

impl Entry {
    pub fn title(&self) -> &str {
        match &self.frontmatter {
            Frontmatter::Post(fm) => &fm.title,
            Frontmatter::Work(fm) => &fm.title,
            Frontmatter::Blog(fm) => &fm.title,
        }
    }

    pub fn description(&self) -> &str {
        match &self.frontmatter {
            Frontmatter::Post(fm) => &fm.description,
            Frontmatter::Work(fm) => &fm.description,
            Frontmatter::Blog(fm) => &fm.description,
        }
    }

    /// The moment the entry was published. Listings are ordered by it.
    pub fn published_at(&self) -> DateTime<Utc> {
        match &self.frontmatter {
            Frontmatter::Post(fm) => fm.published_date,
            Frontmatter::Work(fm) => fm.published_date,
            Frontmatter::Blog(fm) => fm.publish_date,
        }
    }

    /// UTC calendar day of [`Entry::published_at`], for display.
    pub fn published_date(&self) -> NaiveDate {
        self.published_at().date_naive()
    }

    pub fn published(&self) -> bool {
        match &self.frontmatter {
            Frontmatter::Post(fm) => fm.published,
            Frontmatter::Work(fm) => fm.published,
            Frontmatter::Blog(fm) => fm.published,
        }
    }

    /// Only posts belong to a series.
    pub fn series(&self) -> Option<&str> {
        match &self.frontmatter {
            Frontmatter::Post(fm) => fm.series.as_deref(),
            Frontmatter::Work(_) | Frontmatter::Blog(_) => None,
        }
    }

    pub fn tags(&self) -> Vec<&str> {
        match &self.frontmatter {
            Frontmatter::Post(fm) => vec![fm.tag.as_str()],
            Frontmatter::Work(fm) => fm.tag.as_deref().into_iter().collect(),
            Frontmatter::Blog(fm) => fm.tags.iter().map(String::as_str).collect(),
        }
    }
}
