use std::{fs, path::PathBuf, str::FromStr};

use anyhow::Context;
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where the bibliography text comes from, which can either be
///
/// - a local file, or
/// - an `http(s)` URL fetched once.
pub enum Source {
    File(PathBuf),
    Remote(Url),
}

impl FromStr for Source {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Url::parse(s) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Source::Remote(url)),
            // Anything else, including Windows drive letters that parse as a scheme, is a path.
            _ => Ok(Source::File(PathBuf::from(s))),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::File(path) => write!(f, "{}", path.display()),
            Source::Remote(url) => write!(f, "{url}"),
        }
    }
}

impl Source {
    pub fn fetch(&self) -> anyhow::Result<String> {
        match self {
            Source::File(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            Source::Remote(url) => {
                tracing::debug!("fetching {url}");
                let body = ureq::get(url.as_str())
                    .header("Accept", "application/x-bibtex, application/json, text/plain")
                    .call()
                    .with_context(|| format!("failed to fetch {url}"))?
                    .body_mut()
                    .read_to_string()
                    .with_context(|| format!("failed to read response body from {url}"))?;
                Ok(body)
            }
        }
    }
}
