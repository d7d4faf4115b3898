use std::{borrow::Borrow, collections::BTreeMap};

use log::warn;
use serde::Serialize;

use crate::{entry::Entry, slug::slugify};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    #[default]
    Descending,
    /// An order name that was not recognized. Sorting leaves the input as is.
    Unordered,
}

impl From<&str> for SortOrder {
    fn from(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "ascending" | "asc" => Self::Ascending,
            "descending" | "desc" => Self::Descending,
            _ => {
                warn!("Unknown sort order {name:?}, entries are left unsorted");
                Self::Unordered
            }
        }
    }
}

/// Stable sort by publication moment, whatever offset it was written in.
/// Entries published at the same moment keep their input order.
pub fn sort_by_date<T: Borrow<Entry>>(mut entries: Vec<T>, order: SortOrder) -> Vec<T> {
    match order {
        SortOrder::Ascending => entries.sort_by_key(|e| e.borrow().published_at()),
        SortOrder::Descending => entries.sort_by(|a, b| {
            b.borrow()
                .published_at()
                .cmp(&a.borrow().published_at())
        }),
        SortOrder::Unordered => {}
    }
    entries
}

pub fn filter_published<T: Borrow<Entry>>(entries: Vec<T>) -> Vec<T> {
    entries.into_iter().published().collect()
}

/// Exact, case-sensitive match. Entries outside any series never match.
pub fn filter_by_series<T: Borrow<Entry>>(entries: Vec<T>, series: &str) -> Vec<T> {
    entries.into_iter().in_series(series).collect()
}

/// Keep entries carrying a tag whose slug equals `tag_slug`.
pub fn filter_by_tag<T: Borrow<Entry>>(entries: Vec<T>, tag_slug: &str) -> Vec<T> {
    entries.into_iter().tagged(tag_slug).collect()
}

fn is_in_series(entry: &Entry, series: &str) -> bool {
    entry.series() == Some(series)
}

fn has_tag(entry: &Entry, tag_slug: &str) -> bool {
    entry.tags().into_iter().any(|tag| slugify(tag) == tag_slug)
}

/// The same predicates as the `filter_*` functions, applied while iterating.
pub trait EntryIterExt: Iterator + Sized
where
    Self::Item: Borrow<Entry>,
{
    fn published(self) -> impl Iterator<Item = Self::Item> {
        self.filter(|e| e.borrow().published())
    }

    fn in_series(self, series: &str) -> impl Iterator<Item = Self::Item> {
        self.filter(move |e| is_in_series(e.borrow(), series))
    }

    fn tagged(self, tag_slug: &str) -> impl Iterator<Item = Self::Item> {
        self.filter(move |e| has_tag(e.borrow(), tag_slug))
    }
}

impl<I> EntryIterExt for I
where
    I: Iterator,
    I::Item: Borrow<Entry>,
{
}

/// Group entries by tag slug. Keys are sorted, entries keep input order.
pub fn tag_index(entries: &[Entry]) -> BTreeMap<String, Vec<&Entry>> {
    let mut tags: BTreeMap<String, Vec<&Entry>> = BTreeMap::new();
    for entry in entries {
        let mut seen = vec![];
        for tag in entry.tags() {
            let slug = slugify(tag);
            if slug.is_empty() || seen.contains(&slug) {
                continue;
            }
            tags.entry(slug.clone()).or_default().push(entry);
            seen.push(slug);
        }
    }
    tags
}

/// Previous and next entries around `slug` in an ordered series listing.
pub fn series_neighbours<'a, T: Borrow<Entry>>(
    series: &'a [T],
    slug: &str,
) -> (Option<&'a Entry>, Option<&'a Entry>) {
    let Some(pos) = series.iter().position(|e| e.borrow().slug == slug) else {
        return (None, None);
    };
    let prev = pos.checked_sub(1).map(|i| series[i].borrow());
    let next = series.get(pos + 1).map(|e| e.borrow());
    (prev, next)
}
