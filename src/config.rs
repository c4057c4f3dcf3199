use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use serde::Deserialize;

use crate::format::{DEFAULT_MAX_AUTHORS, JournalAliases, SelfIdentity};

/// Picked up from the working directory when `--config` isn't given.
pub const DEFAULT_CONFIG_FILE: &str = "pubpage.toml";

/// On-disk TOML configuration. Every key is optional; missing ones fall back to the defaults
/// below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub owner: OwnerConfig,
    pub publications: PublicationsConfig,
    pub journal_aliases: BTreeMap<String, String>,
    pub gallery: GalleryConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OwnerConfig {
    pub given: Option<String>,
    pub family: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PublicationsConfig {
    pub source: Option<String>,
    pub thumbnail_path: Option<String>,
    pub max_authors: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    pub media_path: Option<String>,
    pub rows: Option<Vec<GalleryRow>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GalleryRow {
    /// Id of the container element the row renders into.
    pub id: String,
    pub videos: Vec<Video>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Video {
    pub title: String,
    pub src: String,
}

/// Resolved settings after defaults are applied.
#[derive(Debug, Clone)]
pub struct Config {
    pub owner: SelfIdentity,
    pub source: String,
    pub thumbnail_path: String,
    pub max_authors: usize,
    pub aliases: JournalAliases,
    pub media_path: String,
    pub rows: Vec<GalleryRow>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            owner: SelfIdentity::default(),
            source: "static/pub.bib".to_string(),
            thumbnail_path: "static/thumbnail/".to_string(),
            max_authors: DEFAULT_MAX_AUTHORS,
            aliases: JournalAliases::builtin(),
            media_path: "./static/ani/".to_string(),
            rows: default_rows(),
        }
    }
}

fn video(title: &str, src: &str) -> Video {
    Video {
        title: title.to_string(),
        src: src.to_string(),
    }
}

fn default_rows() -> Vec<GalleryRow> {
    vec![
        GalleryRow {
            id: "video-row-general".to_string(),
            videos: vec![
                video("Free-floating Planet event", "ffp_art.mp4"),
                video("Single-lens event", "pspl.mp4"),
                video("Binary-lens event ASASSN-22av", "22av.mp4"),
            ],
        },
        GalleryRow {
            id: "video-row-ffp".to_string(),
            videos: vec![
                video(
                    "FFP: Earth-like lens + Sun-like source",
                    "1Me_1Rsun_murel5.0_Dl6.mp4",
                ),
                video(
                    "FFP: Earth-like lens + Giant source",
                    "1Me_10Rsun_murel5.0_Dl6.mp4",
                ),
                video(
                    "FFP: Neptune-like lens + Sun-like source",
                    "10Me_1Rsun_murel5.0_Dl6.mp4",
                ),
                video(
                    "FFP: Neptune-like lens + Giant source",
                    "10Me_10Rsun_murel5.0_Dl6.mp4",
                ),
            ],
        },
    ]
}

impl ConfigFile {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid configuration")
    }

    /// Layer this file over the built-in defaults.
    pub fn resolve(self) -> anyhow::Result<Config> {
        let defaults = Config::default();

        let max_authors = self.publications.max_authors.unwrap_or(defaults.max_authors);
        if max_authors == 0 {
            bail!("publications.max_authors must be at least 1");
        }

        Ok(Config {
            owner: SelfIdentity::new(
                self.owner.given.unwrap_or(defaults.owner.given),
                self.owner.family.unwrap_or(defaults.owner.family),
            ),
            source: self.publications.source.unwrap_or(defaults.source),
            thumbnail_path: self
                .publications
                .thumbnail_path
                .unwrap_or(defaults.thumbnail_path),
            max_authors,
            aliases: defaults.aliases.with(self.journal_aliases),
            media_path: self.gallery.media_path.unwrap_or(defaults.media_path),
            rows: self.gallery.rows.unwrap_or(defaults.rows),
        })
    }
}

impl Config {
    /// Load from `path` if given, otherwise from `pubpage.toml` in the working directory if it
    /// exists, otherwise use defaults. An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let cwd = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !cwd.is_file() {
                    tracing::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                    return Ok(Config::default());
                }
                cwd
            }
        };

        tracing::debug!("loading config from {}", path.display());
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        ConfigFile::parse(&content)
            .and_then(ConfigFile::resolve)
            .with_context(|| format!("in {}", path.display()))
    }
}
