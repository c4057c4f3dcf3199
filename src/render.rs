//! HTML templates for the homepage sections.
//!
//! Every function here returns a string fragment. Titles and other free text
//! are escaped; journal alias markup is inserted as-is.

use quick_xml::escape::escape;

use crate::{
    config::{Config, GalleryRow, Video},
    doi::Doi,
    format::{format_authors, resolve_venue_alias},
    item::Record,
};

/// Shown in place of the publication list when the bibliography can't be loaded.
pub const UNAVAILABLE: &str = "<p>Error loading publications. Please try again later.</p>";

const MODAL_SCRIPT: &str = r#"
const modal = document.getElementById("imageModal");
const modalImg = document.getElementById("modalImage");

function openModal(src) {
    modal.style.display = "flex";
    modalImg.src = src;
    requestAnimationFrame(() => modal.classList.add("show"));
}

function closeModal() {
    modal.classList.remove("show");
    setTimeout(() => {
        modal.style.display = "none";
    }, 300);
}

window.onclick = (e) => {
    if (e.target === modal) closeModal();
};
"#;

fn doi_link(raw: &str) -> Option<String> {
    let doi = Doi::parse(raw)?;
    let url = doi.to_url()?;
    Some(format!(
        r#"<a href="{}" target="_blank">doi: {}</a>"#,
        escape(url.as_str()),
        escape(doi.to_string().as_str())
    ))
}

/// One publication card.
pub fn publication(record: &Record, config: &Config) -> String {
    let thumb = escape(format!("{}{}.png", config.thumbnail_path, record.id)).into_owned();
    let title = escape(record.title.as_str()).into_owned();
    let authors = format_authors(
        record.authors.as_deref(),
        &config.owner,
        config.max_authors,
    );
    let venue_label = record
        .venue
        .as_deref()
        .map(|v| escape(v).into_owned())
        .unwrap_or_default();

    // Alias values are markup; anything else is plain text from the bibliography.
    let journal_name = match record.container_title.as_deref() {
        Some(raw) if config.aliases.get(raw).is_none() => escape(raw).into_owned(),
        raw => resolve_venue_alias(raw, &config.aliases),
    };

    let journal = [
        Some(journal_name),
        record.issued_year.map(|y| y.to_string()),
        record.doi.as_deref().and_then(doi_link),
    ]
    .into_iter()
    .flatten()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(", ");

    format!(
        r#"
        <div class="publication-item">
            <div class="pub-thumbnail" onclick="openModal('{thumb}')">
                <img src="{thumb}" alt="{title}" onerror="this.style.display='none'">
            </div>
            <div class="pub-content">
                <div class="pub-title">{title}</div>
                <div class="pub-authors">{authors}</div>
                <div class="pub-venue-container">
                    <span class="pub-venue">{venue_label}</span> </div>
                <div class="pub-journals">
                    {journal}
                </div>
            </div>
        </div>
    "#
    )
}

/// Every card, in bibliography order.
pub fn publications(records: &[Record], config: &Config) -> String {
    records.iter().map(|r| publication(r, config)).collect()
}

fn video(v: &Video, media_path: &str) -> String {
    let src = escape(format!("{media_path}{}", v.src)).into_owned();
    let title = escape(v.title.as_str());
    format!(
        r#"
        <div class="video-wrapper">
            <video controls preload="metadata">
                <source src="{src}" type="video/mp4" />
                Your browser does not support the video tag.
            </video>
            <div class="video-title">{title}</div>
        </div>
    "#
    )
}

/// The inside of one gallery row container.
pub fn video_row(row: &GalleryRow, media_path: &str) -> String {
    row.videos.iter().map(|v| video(v, media_path)).collect()
}

/// Each configured row wrapped in its container element.
pub fn gallery(config: &Config) -> String {
    config
        .rows
        .iter()
        .map(|row| {
            format!(
                "<div id=\"{}\" class=\"video-row\">{}</div>\n",
                escape(row.id.as_str()),
                video_row(row, &config.media_path)
            )
        })
        .collect()
}

/// A standalone document holding the publication list, the gallery and the thumbnail modal.
pub fn page(publications_html: &str, config: &Config) -> String {
    let owner = escape(format!("{} {}", config.owner.given, config.owner.family)).into_owned();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{owner}</title>
</head>
<body>
<section id="publications">
<div id="publications-container">{publications_html}</div>
</section>
<section id="animations">
{gallery}</section>
<div id="imageModal" class="modal">
<img id="modalImage" class="modal-content" alt="">
</div>
<script>{MODAL_SCRIPT}</script>
</body>
</html>
"#,
        gallery = gallery(config),
    )
}
