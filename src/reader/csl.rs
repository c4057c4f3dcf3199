use anyhow::Context;
use serde::Deserialize;

use crate::{
    item::{Author, Loaded, Record},
    reader::Reader,
};

/// CSL-JSON, as exported by citation managers and `citation-js`.
pub struct Csl;

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Id {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct CslName {
    given: Option<String>,
    family: Option<String>,
    literal: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct CslDate {
    #[serde(rename = "date-parts")]
    date_parts: Vec<Vec<serde_json::Value>>,
}

#[derive(Deserialize, Debug)]
struct CslItem {
    id: Id,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<Vec<CslName>>,
    #[serde(default, rename = "container-title")]
    container_title: Option<String>,
    #[serde(default)]
    issued: Option<CslDate>,
    #[serde(default, rename = "DOI")]
    doi: Option<String>,
    #[serde(default)]
    venue: Option<String>,
}

impl Reader for Csl {
    fn detect(text: &str) -> bool {
        text.trim_start().starts_with('[')
    }

    fn read(text: &str) -> anyhow::Result<Loaded> {
        let items: Vec<CslItem> =
            serde_json::from_str(text).context("failed to parse CSL-JSON")?;

        let mut loaded = Loaded::default();
        for item in items {
            match to_record(item) {
                Some(record) => loaded.records.push(record),
                None => loaded.skipped += 1,
            }
        }
        Ok(loaded)
    }
}

fn to_record(item: CslItem) -> Option<Record> {
    let id = match item.id {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    };
    let Some(title) = item.title.filter(|t| !t.trim().is_empty()) else {
        tracing::info!("skipping `{id}`: no title");
        return None;
    };

    // Year may be an integer or a numeric string depending on the exporter.
    let issued_year = item
        .issued
        .and_then(|d| d.date_parts.into_iter().next())
        .and_then(|parts| parts.into_iter().next())
        .and_then(|y| match y {
            serde_json::Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        });

    Some(Record {
        id,
        title,
        authors: item
            .author
            .map(|names| names.into_iter().map(to_author).collect()),
        container_title: item.container_title,
        issued_year,
        doi: item.doi,
        venue: item.venue.filter(|v| !v.is_empty()),
    })
}

fn to_author(name: CslName) -> Author {
    match name.literal {
        Some(literal) => Author {
            family: Some(literal),
            given: name.given,
            literal: true,
        },
        None => Author {
            family: name.family,
            given: name.given,
            literal: false,
        },
    }
}
