/// A single bibliography entry, reduced to the fields a publication card shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    /// Entry key. Also names the thumbnail image.
    pub id: String,
    pub title: String,
    /// `None` when the entry has no author field at all.
    pub authors: Option<Vec<Author>>,
    /// Raw journal or proceedings name, possibly an alias macro like `\apj`.
    pub container_title: Option<String>,
    pub issued_year: Option<i32>,
    pub doi: Option<String>,
    /// Free-form label rendered above the journal line.
    pub venue: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Author {
    pub family: Option<String>,
    pub given: Option<String>,
    /// Group or collaboration names, e.g. "OGLE Collaboration".
    pub literal: bool,
}

impl Author {
    #[cfg(test)]
    pub fn new(given: &str, family: &str) -> Self {
        Author {
            family: Some(family.to_string()),
            given: Some(given.to_string()),
            literal: false,
        }
    }

    pub fn literal(name: &str) -> Self {
        Author {
            family: Some(name.to_string()),
            given: None,
            literal: true,
        }
    }
}

/// Records read from a bibliography, plus how many entries were dropped.
#[derive(Debug, Default)]
pub struct Loaded {
    pub records: Vec<Record>,
    pub skipped: usize,
}
