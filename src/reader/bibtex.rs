use anyhow::anyhow;
use biblatex::{Bibliography, Chunk, Entry, Person, Spanned};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    item::{Author, Loaded, Record},
    reader::Reader,
};

/// BibTeX and BibLaTeX `.bib` files.
pub struct Bibtex;

impl Reader for Bibtex {
    fn detect(_text: &str) -> bool {
        true
    }

    fn read(text: &str) -> anyhow::Result<Loaded> {
        match Bibliography::parse(text) {
            Ok(bib) => Ok(collect(bib.iter())),
            Err(e) => {
                tracing::warn!("bibliography did not parse as a whole ({e}), retrying per entry");
                read_individually(text)
            }
        }
    }
}

/// Real-world `.bib` files often carry one broken entry. Parse each `@` block on its own and
/// keep whatever survives. `@string` and `@preamble` blocks are carried in front of every later
/// entry so abbreviations still resolve.
fn read_individually(text: &str) -> anyhow::Result<Loaded> {
    static ENTRY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*@([a-zA-Z]+)").unwrap());

    let blocks: Vec<(usize, &str)> = ENTRY_RE
        .captures_iter(text)
        .filter_map(|c| Some((c.get(0)?.start(), c.get(1)?.as_str())))
        .collect();

    let mut prelude = String::new();
    let mut parsed = Vec::new();
    let mut broken = 0;
    for (i, &(start, kind)) in blocks.iter().enumerate() {
        let end = blocks.get(i + 1).map_or(text.len(), |&(next, _)| next);
        let block = &text[start..end];

        if kind.eq_ignore_ascii_case("string") || kind.eq_ignore_ascii_case("preamble") {
            match Bibliography::parse(&format!("{prelude}{block}")) {
                Ok(_) => prelude.push_str(block),
                Err(e) => {
                    tracing::debug!("dropping unparsable @{kind} at byte {start}: {e}");
                    broken += 1;
                }
            }
            continue;
        }

        match Bibliography::parse(&format!("{prelude}{block}")) {
            Ok(bib) => parsed.push(bib),
            Err(e) => {
                tracing::debug!("dropping unparsable entry at byte {start}: {e}");
                broken += 1;
            }
        }
    }

    if parsed.is_empty() {
        return Err(anyhow!("failed to parse BibLaTeX: no readable entries"));
    }

    let mut loaded = collect(parsed.iter().flat_map(|bib| bib.iter()));
    loaded.skipped += broken;
    Ok(loaded)
}

fn collect<'a>(entries: impl Iterator<Item = &'a Entry>) -> Loaded {
    let mut loaded = Loaded::default();
    for entry in entries {
        match to_record(entry) {
            Some(record) => loaded.records.push(record),
            None => {
                tracing::info!("skipping `{}`: no title", entry.key);
                loaded.skipped += 1;
            }
        }
    }
    loaded
}

fn to_record(entry: &Entry) -> Option<Record> {
    let title = field(entry, "title").filter(|t| !t.is_empty())?;

    // An author field that exists but can't be split still counts as present.
    let authors = entry.get("author").map(|_| {
        entry
            .author()
            .unwrap_or_default()
            .iter()
            .map(to_author)
            .collect::<Vec<_>>()
    });

    let container_title = field(entry, "journal")
        .or_else(|| field(entry, "journaltitle"))
        .or_else(|| field(entry, "booktitle"));

    let issued_year = field(entry, "year")
        .and_then(|y| leading_year(&y))
        .or_else(|| field(entry, "date").and_then(|d| leading_year(&d)));

    Some(Record {
        id: entry.key.clone(),
        title,
        authors,
        container_title,
        issued_year,
        doi: field(entry, "doi"),
        venue: field(entry, "venue").filter(|v| !v.is_empty()),
    })
}

fn to_author(p: &Person) -> Author {
    let mut family = Vec::new();
    if !p.prefix.is_empty() {
        family.push(p.prefix.as_str());
    }
    if !p.name.is_empty() {
        family.push(p.name.as_str());
    }
    if !p.suffix.is_empty() {
        family.push(p.suffix.as_str());
    }
    let family = family.join(" ");

    // `{OGLE Collaboration}` comes through with no given name at all.
    if p.given_name.is_empty() {
        return Author::literal(&family);
    }

    Author {
        family: (!family.is_empty()).then_some(family),
        given: Some(p.given_name.clone()),
        literal: false,
    }
}

fn field(entry: &Entry, key: &str) -> Option<String> {
    entry.get(key).map(|c| chunks_to_string(c).trim().to_string())
}

fn chunks_to_string(chunks: &[Spanned<Chunk>]) -> String {
    chunks
        .iter()
        .map(|c| match &c.v {
            Chunk::Normal(s) | Chunk::Verbatim(s) => s.clone(),
            Chunk::Math(s) => format!("${s}$"),
        })
        .collect()
}

fn leading_year(s: &str) -> Option<i32> {
    static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(-?\d{1,4})").unwrap());
    YEAR_RE.captures(s)?.get(1)?.as_str().parse().ok()
}
