use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use log::{debug, info};

use crate::{
    entry::{ContentKind, Entry},
    frontmatter::{self, Frontmatter},
};

/// File-backed content collections rooted at one directory
/// (`<root>/posts`, `<root>/works`, `<root>/blog`).
#[derive(Debug, Clone)]
pub struct ContentSource {
    root: PathBuf,
}

impl ContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_dir(&self, kind: ContentKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Lazily load the entries of a collection.
    ///
    /// Matching files are enumerated up front; each one is read and parsed
    /// only when the iterator reaches it. Every call starts over.
    pub fn entries(&self, kind: ContentKind) -> anyhow::Result<Entries> {
        let dir = self.collection_dir(kind);
        let files = discover(kind, &dir)
            .with_context(|| format!("while reading collection {kind} at {dir:?}"))?;
        info!("{} {kind} file(s) found in {dir:?}", files.len());
        Ok(Entries {
            kind,
            dir,
            files: files.into_iter(),
        })
    }

    /// Eagerly load every entry of a collection, failing on the first bad file.
    /// Order follows directory enumeration and is not meaningful.
    pub fn load_all(&self, kind: ContentKind) -> anyhow::Result<Vec<Entry>> {
        self.entries(kind)?.collect()
    }

    /// Load the single entry with the given slug, if any.
    pub fn find(&self, kind: ContentKind, slug: &str) -> anyhow::Result<Option<Entry>> {
        for entry in self.entries(kind)? {
            let entry = entry?;
            if entry.slug == slug {
                return Ok(Some(entry));
            }
        }
        Ok(None)
    }
}

/// Iterator returned by [`ContentSource::entries`].
#[derive(Debug)]
pub struct Entries {
    kind: ContentKind,
    dir: PathBuf,
    files: std::vec::IntoIter<PathBuf>,
}

impl Iterator for Entries {
    type Item = anyhow::Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.files.next()?;
        Some(
            load_entry(self.kind, &self.dir, &path)
                .with_context(|| format!("while loading {path:?}")),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.files.size_hint()
    }
}

fn discover(kind: ContentKind, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = vec![];

    let mut q = VecDeque::new();
    q.push_back(dir.to_path_buf());
    while let Some(current) = q.pop_front() {
        for entry in std::fs::read_dir(&current)? {
            let entry = entry?;
            let meta = entry.metadata()?;
            let path = entry.path();

            if meta.is_dir() {
                if kind.recursive() {
                    q.push_back(path);
                } else {
                    debug!("skipping nested directory {path:?}");
                }
            } else if meta.is_file() && has_extension(&path, kind.extensions()) {
                files.push(path);
            } else {
                debug!("skipping {path:?}");
            }
        }
    }

    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

fn load_entry(kind: ContentKind, dir: &Path, path: &Path) -> anyhow::Result<Entry> {
    let content = std::fs::read_to_string(path)?;
    let Some((header, body)) = frontmatter::split(&content) else {
        bail!("Missing frontmatter block");
    };
    let frontmatter = Frontmatter::parse(kind, header).context("Invalid frontmatter")?;

    Ok(Entry {
        kind,
        slug: slug_of(dir, path)?,
        path: path.to_path_buf(),
        frontmatter,
        body: body.to_string(),
    })
}

fn slug_of(dir: &Path, path: &Path) -> anyhow::Result<String> {
    let mut relative = path.strip_prefix(dir)?.to_path_buf();
    relative.set_extension("");
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    Ok(parts.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn post(title: &str, date: &str, published: bool) -> String {
        format!(
            "---\ntitle: {title}\ndescription: about {title}\npublishedDate: {date}\ntag: Rust\npublished: {published}\n---\nbody of {title}\n"
        )
    }

    #[test]
    fn load_all_reads_flat_collection() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "posts/first.mdx", &post("First", "2024-01-01", true));
        write(tmp.path(), "posts/second.mdx", &post("Second", "2023-01-01", false));
        write(tmp.path(), "posts/notes.txt", "ignored");
        write(tmp.path(), "posts/nested/deep.mdx", &post("Deep", "2020-01-01", true));

        let source = ContentSource::new(tmp.path());
        let mut entries = source.load_all(ContentKind::Posts).unwrap();
        entries.sort_by(|a, b| a.slug.cmp(&b.slug));

        let slugs: Vec<_> = entries.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, ["first", "second"]);
        assert_eq!(entries[0].title(), "First");
        assert_eq!(entries[0].body, "body of First\n");
        assert!(!entries[1].published());
    }

    #[test]
    fn blog_collection_is_recursive() {
        let tmp = TempDir::new().unwrap();
        let blog = "---\ntitle: B\ndescription: d\npublish_date: 2024-02-02\ntags: [rust]\npublished: true\ntype: article\n---\n";
        write(tmp.path(), "blog/top.md", blog);
        write(tmp.path(), "blog/2024/inner.mdx", blog);

        let source = ContentSource::new(tmp.path());
        let mut slugs: Vec<_> = source
            .load_all(ContentKind::Blog)
            .unwrap()
            .into_iter()
            .map(|e| e.slug)
            .collect();
        slugs.sort();
        assert_eq!(slugs, ["2024/inner", "top"]);
    }

    #[test]
    fn malformed_file_is_fatal_and_named() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "works/broken.mdx", "---\ntitle: [unclosed\n---\n");

        let err = ContentSource::new(tmp.path())
            .load_all(ContentKind::Works)
            .unwrap_err();
        assert!(format!("{err:#}").contains("broken.mdx"));
    }

    #[test]
    fn missing_frontmatter_is_rejected() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "works/plain.mdx", "just text\n");

        let err = ContentSource::new(tmp.path())
            .load_all(ContentKind::Works)
            .unwrap_err();
        assert!(format!("{err:#}").contains("Missing frontmatter block"));
    }

    #[test]
    fn missing_collection_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(ContentSource::new(tmp.path()).entries(ContentKind::Posts).is_err());
    }

    #[test]
    fn entries_is_lazy_and_restartable() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "posts/good.mdx", &post("Good", "2024-01-01", true));
        write(tmp.path(), "posts/bad.mdx", "---\ntitle: only\n---\n");

        let source = ContentSource::new(tmp.path());
        let entries = source.entries(ContentKind::Posts).unwrap();
        assert_eq!(entries.size_hint(), (2, Some(2)));

        let results: Vec<_> = entries.collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);

        assert_eq!(source.entries(ContentKind::Posts).unwrap().count(), 2);
    }

    #[test]
    fn find_by_slug() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "posts/hello.mdx", &post("Hello", "2024-01-01", true));

        let source = ContentSource::new(tmp.path());
        let found = source.find(ContentKind::Posts, "hello").unwrap().unwrap();
        assert_eq!(found.title(), "Hello");
        assert!(source.find(ContentKind::Posts, "nope").unwrap().is_none());
    }
}
