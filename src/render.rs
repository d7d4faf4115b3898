use std::{borrow::Borrow, collections::BTreeMap, fmt::Write as _, str::FromStr};

use anyhow::bail;
use chrono::NaiveDate;
use maud::html;
use serde::Serialize;

use crate::{
    entry::{ContentKind, Entry},
    toc::Heading,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Json,
    Html,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "html" => Ok(Self::Html),
            _ => bail!("Unknown output format: {s}"),
        }
    }
}

/// What listings expose of an entry.
#[derive(Serialize, Debug)]
struct EntrySummary<'a> {
    kind: ContentKind,
    slug: &'a str,
    title: &'a str,
    description: &'a str,
    published_date: NaiveDate,
    published: bool,
    tags: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    series: Option<&'a str>,
}

impl<'a> From<&'a Entry> for EntrySummary<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            kind: entry.kind,
            slug: &entry.slug,
            title: entry.title(),
            description: entry.description(),
            published_date: entry.published_date(),
            published: entry.published(),
            tags: entry.tags(),
            series: entry.series(),
        }
    }
}

fn href(entry: &Entry) -> String {
    format!("/{}/{}", entry.kind, entry.slug)
}

pub fn render_list<T: Borrow<Entry>>(
    format: Format,
    site_name: &str,
    title: &str,
    entries: &[T],
) -> anyhow::Result<String> {
    let entries: Vec<&Entry> = entries.iter().map(|e| e.borrow()).collect();
    let out = match format {
        Format::Text => {
            let mut res = String::new();
            for entry in entries {
                let draft = if entry.published() { "" } else { " (draft)" };
                writeln!(
                    res,
                    "{}  {}  {}{}",
                    entry.published_date(),
                    entry.slug,
                    entry.title(),
                    draft
                )?;
            }
            res
        }
        Format::Json => {
            let summaries: Vec<EntrySummary> = entries.into_iter().map(EntrySummary::from).collect();
            serde_json::to_string_pretty(&summaries)?
        }
        Format::Html => html! {
            section.listing {
                @if !site_name.is_empty() {
                    p.site-name { (site_name) }
                }
                h2 { (title) }
                ul {
                    @for entry in &entries {
                        li {
                            time datetime=(entry.published_date().to_string()) { (entry.published_date().to_string()) }
                            " "
                            a href=(href(entry)) { (entry.title()) }
                        }
                    }
                }
            }
        }
        .into(),
    };
    Ok(out)
}

pub fn render_tags(format: Format, index: &BTreeMap<String, Vec<&Entry>>) -> anyhow::Result<String> {
    let out = match format {
        Format::Text => {
            let mut res = String::new();
            for (tag, entries) in index {
                writeln!(res, "{tag} ({})", entries.len())?;
            }
            res
        }
        Format::Json => {
            let counts: BTreeMap<&str, usize> = index
                .iter()
                .map(|(tag, entries)| (tag.as_str(), entries.len()))
                .collect();
            serde_json::to_string_pretty(&counts)?
        }
        Format::Html => html! {
            ul.tags {
                @for (tag, entries) in index {
                    li {
                        a href={ "/tags/" (tag) } { (tag) }
                        " "
                        span.count { (entries.len()) }
                    }
                }
            }
        }
        .into(),
    };
    Ok(out)
}

/// `url` is the page the anchors point into.
pub fn render_toc(format: Format, url: &str, headings: &[Heading]) -> anyhow::Result<String> {
    let out = match format {
        Format::Text => {
            let mut res = String::new();
            for h in headings {
                let indent = "  ".repeat(h.depth.saturating_sub(2));
                writeln!(res, "{indent}{} (#{})", h.text, h.slug)?;
            }
            res
        }
        Format::Json => serde_json::to_string_pretty(headings)?,
        Format::Html => html! {
            ul.toc {
                @for h in headings {
                    li class={ "toc-depth-" (h.depth) } {
                        a href={ (url) "#" (h.slug) } { (h.text) }
                    }
                }
            }
        }
        .into(),
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::tests::mk_post;

    #[test]
    fn text_listing_marks_drafts() {
        let entries = vec![
            mk_post("hello", (2024, 1, 2), true, "Rust", None),
            mk_post("wip", (2024, 1, 3), false, "Rust", None),
        ];
        let out = render_list(Format::Text, "", "posts", &entries).unwrap();
        assert_eq!(out, "2024-01-02  hello  hello\n2024-01-03  wip  wip (draft)\n");
    }

    #[test]
    fn json_listing_uses_summaries() {
        let entries = vec![mk_post("hello", (2024, 1, 2), true, "Rust", Some("Intro"))];
        let out = render_list(Format::Json, "", "posts", &entries).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["kind"], "posts");
        assert_eq!(value[0]["published_date"], "2024-01-02");
        assert_eq!(value[0]["tags"][0], "Rust");
        assert_eq!(value[0]["series"], "Intro");
    }

    #[test]
    fn html_listing_links_entries() {
        let entries = vec![mk_post("hello", (2024, 1, 2), true, "Rust", None)];
        let out = render_list(Format::Html, "My Site", "Posts", &entries).unwrap();
        assert!(out.contains("<p class=\"site-name\">My Site</p>"));
        assert!(out.contains("<a href=\"/posts/hello\">hello</a>"));
    }

    #[test]
    fn html_escapes_titles() {
        let mut entry = mk_post("x", (2024, 1, 2), true, "Rust", None);
        if let crate::frontmatter::Frontmatter::Post(fm) = &mut entry.frontmatter {
            fm.title = "<b>bold</b>".to_string();
        }
        let out = render_list(Format::Html, "", "Posts", &[entry]).unwrap();
        assert!(out.contains("&lt;b&gt;bold&lt;/b&gt;"));
    }

    #[test]
    fn toc_html_links_into_page() {
        let headings = vec![Heading {
            depth: 3,
            text: "Details".to_string(),
            slug: "details".to_string(),
        }];
        let out = render_toc(Format::Html, "/posts/hello", &headings).unwrap();
        assert_eq!(
            out,
            "<ul class=\"toc\"><li class=\"toc-depth-3\"><a href=\"/posts/hello#details\">Details</a></li></ul>"
        );
        let text = render_toc(Format::Text, "/posts/hello", &headings).unwrap();
        assert_eq!(text, "  Details (#details)\n");
    }

    #[test]
    fn tags_text_counts_entries() {
        let entries = vec![
            mk_post("a", (2024, 1, 2), true, "Rust", None),
            mk_post("b", (2024, 1, 3), true, "Rust", None),
            mk_post("c", (2024, 1, 4), true, "Go", None),
        ];
        let index = crate::pipeline::tag_index(&entries);
        let out = render_tags(Format::Text, &index).unwrap();
        assert_eq!(out, "go (1)\nrust (2)\n");
    }

    #[test]
    fn format_names() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert!("yaml".parse::<Format>().is_err());
    }
}
