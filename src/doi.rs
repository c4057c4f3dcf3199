use once_cell::sync::Lazy;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;
use url::Url;

const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A DOI split into its registrant prefix and item suffix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Doi {
    prefix: String,
    suffix: String,
}

impl Doi {
    /// Clean up a `doi` field as exporters write it: bare, `doi:`-prefixed, or
    /// as a resolver URL, sometimes with a stray trailing `.`, `,` or `;`.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut s = raw.trim();

        if let Some(rest) = s
            .strip_prefix("doi:")
            .or_else(|| s.strip_prefix("DOI:"))
            .or_else(|| s.strip_prefix("urn:doi:"))
            .or_else(|| s.strip_prefix("URN:DOI:"))
        {
            s = rest.trim_start();
        }

        if let Some(rest) = s
            .strip_prefix("https://doi.org/")
            .or_else(|| s.strip_prefix("http://doi.org/"))
            .or_else(|| s.strip_prefix("https://dx.doi.org/"))
            .or_else(|| s.strip_prefix("http://dx.doi.org/"))
        {
            s = rest;
        }

        if let Some(idx) = s.find(['?', '#']) {
            s = &s[..idx];
        }

        // Closing parens are part of SICI-style DOIs unless they close something outside it.
        s = s.trim_end_matches(['.', ',', ';']);
        while s.ends_with(')') && s.matches(')').count() > s.matches('(').count() {
            s = s[..s.len() - 1].trim_end_matches(['.', ',', ';']);
        }

        static DOI_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^(10\.\d{4,}(?:\.\d+)*)/([^\p{C}\s]+)$").unwrap());

        let caps = DOI_RE.captures(s)?;
        Some(Doi {
            prefix: caps.get(1)?.as_str().to_string(),
            suffix: caps.get(2)?.as_str().to_string(),
        })
    }

    pub fn to_url(&self) -> Option<Url> {
        let enc_suffix = utf8_percent_encode(&self.suffix, PATH_SEGMENT_ENCODE_SET).to_string();
        Url::parse(&format!("https://doi.org/{}/{}", self.prefix, enc_suffix)).ok()
    }
}

impl std::fmt::Display for Doi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.prefix, self.suffix)
    }
}
