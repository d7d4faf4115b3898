pub mod content;
pub mod entry;
pub mod frontmatter;
pub mod listing;
pub mod pipeline;
pub mod render;
pub mod slug;
pub mod toc;

pub use content::ContentSource;
pub use entry::{ContentKind, Entry};
pub use pipeline::{filter_by_series, filter_by_tag, filter_published, sort_by_date, SortOrder};
pub use slug::{deslugify, slugify};
