use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::slug::slugify;

/// Shallowest and deepest heading depth listed in a table of contents.
pub const MIN_DEPTH: usize = 2;
pub const MAX_DEPTH: usize = 4;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub depth: usize,
    pub text: String,
    pub slug: String,
}

/// Headings of depth 2 to 4 of a markdown body, in document order.
///
/// The anchor is the explicit `{#id}` of the heading when it has one,
/// otherwise the slug of its text.
pub fn table_of_contents(body: &str) -> Vec<Heading> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

    let mut headings = vec![];
    // (depth, explicit id, text so far) of the heading being read
    let mut current: Option<(usize, Option<String>, String)> = None;

    for event in Parser::new_ext(body, options) {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                current = Some((level as usize, id.map(|id| id.to_string()), String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, _, buf)) = current.as_mut() {
                    buf.push(' ');
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some((depth, id, text)) = current.take() else {
                    continue;
                };
                if !(MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
                    continue;
                }
                let text = text.trim().to_string();
                let slug = id.unwrap_or_else(|| slugify(&text));
                headings.push(Heading { depth, text, slug });
            }
            _ => {}
        }
    }

    headings
}
