use std::collections::BTreeMap;

use quick_xml::escape::escape;

use crate::item::Author;

pub const DEFAULT_MAX_AUTHORS: usize = 5;

/// Given name some exporters emit when the real one is unknown.
const PLACEHOLDER_GIVEN: &str = "--";

static BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("\\aj", "<i>AJ</i>"),
    ("\\apj", "<i>ApJ</i>"),
    ("\\apjl", "<i>ApJL</i>"),
    ("\\apjs", "<i>ApJS</i>"),
    ("\\aap", "<i>A&A</i>"),
    ("\\aaps", "<i>A&AS</i>"),
    ("\\mnras", "<i>MNRAS</i>"),
    ("\\pasp", "<i>PASP</i>"),
    ("\\araa", "<i>ARA&A</i>"),
    ("\\nat", "<i>Nature</i>"),
    ("\\sci", "<i>Science</i>"),
    ("arXiv e-prints", "<i>arXiv e-prints</i>"),
];

/// The page owner, highlighted wherever they appear in an author list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelfIdentity {
    pub given: String,
    pub family: String,
}

impl SelfIdentity {
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        SelfIdentity {
            given: given.into(),
            family: family.into(),
        }
    }

    fn is(&self, author: &Author) -> bool {
        author.given.as_deref() == Some(self.given.as_str())
            && author.family.as_deref() == Some(self.family.as_str())
    }

    /// "Z. Wu"
    pub fn short_name(&self) -> String {
        match self.given.chars().next() {
            Some(initial) => format!("{initial}. {}", self.family),
            None => self.family.clone(),
        }
    }
}

impl Default for SelfIdentity {
    fn default() -> Self {
        SelfIdentity::new("Zexuan", "Wu")
    }
}

/// Venue code to display markup. Values are trusted HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JournalAliases(BTreeMap<String, String>);

impl JournalAliases {
    pub fn builtin() -> Self {
        JournalAliases(
            BUILTIN_ALIASES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Layer `overrides` on top of the current table.
    pub fn with(mut self, overrides: impl IntoIterator<Item = (String, String)>) -> Self {
        self.0.extend(overrides);
        self
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }
}

impl Default for JournalAliases {
    fn default() -> Self {
        JournalAliases::builtin()
    }
}

fn is_valid(author: &Author) -> bool {
    !author.literal
        && author
            .given
            .as_deref()
            .is_some_and(|g| !g.is_empty() && g != PLACEHOLDER_GIVEN)
}

fn highlight(name: &str) -> String {
    format!("<span class=\"highlight-name\">{name}</span>")
}

fn display_name(author: &Author) -> String {
    let given = author.given.as_deref().unwrap_or_default();
    let name = match author.family.as_deref() {
        Some(family) if !family.is_empty() => format!("{given} {family}"),
        _ => given.to_string(),
    };
    escape(name.as_str()).into_owned()
}

/// Summarise an author list for a publication card.
///
/// Only valid authors (real given name, not a collaboration) are shown or
/// counted. At most `max_display` are listed; the rest collapse into
/// ", and N authors." with the owner called out if they were cut off.
pub fn format_authors(
    authors: Option<&[Author]>,
    me: &SelfIdentity,
    max_display: usize,
) -> String {
    let Some(authors) = authors else {
        return String::new();
    };

    let valid: Vec<&Author> = authors.iter().filter(|a| is_valid(a)).collect();
    if valid.is_empty() {
        return String::new();
    }

    let shown = &valid[..valid.len().min(max_display)];
    let mut result = shown
        .iter()
        .map(|a| {
            let name = display_name(a);
            if me.is(a) { highlight(&name) } else { name }
        })
        .collect::<Vec<_>>()
        .join(", ");

    if valid.len() > max_display {
        let remaining = valid.len() - max_display;
        if shown.iter().any(|a| me.is(a)) {
            result.push_str(&format!(", and {remaining} authors."));
        } else {
            let short = escape(me.short_name().as_str()).into_owned();
            result.push_str(&format!(
                ", and {remaining} authors including {}.",
                highlight(&short)
            ));
        }
    } else {
        result.push('.');
    }

    result
}

/// Map a raw venue to its display markup, falling back to the raw value.
pub fn resolve_venue_alias(raw: Option<&str>, aliases: &JournalAliases) -> String {
    match raw {
        Some(code) => aliases.get(code).unwrap_or(code).to_string(),
        None => String::new(),
    }
}
