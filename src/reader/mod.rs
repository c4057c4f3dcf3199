use anyhow::anyhow;

use crate::item::Loaded;

pub mod bibtex;
pub mod csl;

pub trait Reader {
    /// Whether `text` looks like this reader's format.
    fn detect(text: &str) -> bool;
    fn read(text: &str) -> anyhow::Result<Loaded>;
}

type ReaderFn = fn(&str) -> Option<anyhow::Result<Loaded>>;

/// List of readers to try.
///
/// NOTE: Ordering is important here. BibTeX accepts anything, so it must come last.
static READERS: &[ReaderFn] = &[erase::<csl::Csl>(), erase::<bibtex::Bibtex>()];

/// Turn a reader type into a plain fn pointer so they can share one list.
const fn erase<R: Reader>() -> ReaderFn {
    fn call<R: Reader>(text: &str) -> Option<anyhow::Result<Loaded>> {
        R::detect(text).then(|| R::read(text))
    }

    let f: ReaderFn = call::<R>;
    f
}

/// Guess what format `text` is in and read every entry out of it.
pub fn read(text: &str) -> anyhow::Result<Loaded> {
    READERS
        .iter()
        .find_map(|f| f(text))
        .ok_or_else(|| anyhow!("unrecognised bibliography format"))?
}
