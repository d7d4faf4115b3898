use std::{path::PathBuf, sync::OnceLock};

use folio::{content::ContentSource, render::Format};

/// Settings of one `folio` run. Written once at startup, read-only afterwards.
#[derive(Debug)]
pub(crate) struct State {
    pub content_dir: PathBuf,
    pub format: Format,
    pub site_name: String,
}

static STATE: OnceLock<State> = OnceLock::new();

impl State {
    /// Returns `false` when the state was already set.
    pub(crate) fn init(content_dir: PathBuf, format: Format, site_name: String) -> bool {
        STATE
            .set(Self {
                content_dir,
                format,
                site_name,
            })
            .is_ok()
    }

    /// # Panics
    /// If called before [`State::init`].
    pub(crate) fn instance() -> &'static State {
        STATE.get().expect("state is initialized at startup")
    }

    pub(crate) fn source(&self) -> ContentSource {
        ContentSource::new(&self.content_dir)
    }
}
