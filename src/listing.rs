//! Listings the site pages are built from.

use crate::{
    content::ContentSource,
    entry::{ContentKind, Entry},
    pipeline::{filter_by_series, filter_by_tag, filter_published, sort_by_date, SortOrder},
};

/// Published posts, newest first unless told otherwise.
pub fn sorted_posts(source: &ContentSource, order: SortOrder) -> anyhow::Result<Vec<Entry>> {
    sorted_published(source, ContentKind::Posts, order)
}

pub fn sorted_works(source: &ContentSource) -> anyhow::Result<Vec<Entry>> {
    sorted_published(source, ContentKind::Works, SortOrder::Descending)
}

pub fn sorted_blog(source: &ContentSource, order: SortOrder) -> anyhow::Result<Vec<Entry>> {
    sorted_published(source, ContentKind::Blog, order)
}

/// Published entries of any collection. Filtering happens before sorting.
pub fn sorted_published(
    source: &ContentSource,
    kind: ContentKind,
    order: SortOrder,
) -> anyhow::Result<Vec<Entry>> {
    let entries = source.load_all(kind)?;
    Ok(sort_by_date(filter_published(entries), order))
}

/// Published posts of a series, in reading order (oldest first).
pub fn series_posts(source: &ContentSource, series: &str) -> anyhow::Result<Vec<Entry>> {
    let posts = sorted_posts(source, SortOrder::Ascending)?;
    Ok(filter_by_series(posts, series))
}

/// Every post of a series, drafts included, oldest first.
pub fn similar_posts(source: &ContentSource, series: &str) -> anyhow::Result<Vec<Entry>> {
    let posts = sort_by_date(source.load_all(ContentKind::Posts)?, SortOrder::Ascending);
    Ok(filter_by_series(posts, series))
}

/// Posts tagged `tag_slug`, drafts included, in load order.
pub fn posts_by_tag(source: &ContentSource, tag_slug: &str) -> anyhow::Result<Vec<Entry>> {
    Ok(filter_by_tag(source.load_all(ContentKind::Posts)?, tag_slug))
}
