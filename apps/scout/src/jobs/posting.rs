//! JobPosting: the immutable record that flows through the whole pipeline.

use serde::{Deserialize, Serialize};
use url::Url;

/// Host fragment → platform tag. First match wins.
const PLATFORM_PATTERNS: &[(&str, &str)] = &[("linkedin.com", "linkedin")];

pub const UNKNOWN_PLATFORM: &str = "unknown";

/// Query parameters that only track where a click came from. Anything else in
/// the query may be the posting id (`?id=`, `?gh_jid=`) and is kept.
const TRACKING_PARAMS: &[&str] = &[
    "trk", "trkInfo", "refId", "trackingId", "lipi", "eBP", "fbclid", "gclid", "ref", "src",
];
const TRACKING_PREFIXES: &[&str] = &["utm_"];

/// A single normalized job posting.
///
/// `url` is the canonical identity key used by the dedup gate; two postings with
/// the same `url` are the same job no matter which search surfaced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Raw description text; may still contain HTML or markdown.
    pub description: String,
    pub url: String,
    pub search_origin: String,
    pub platform: String,
}

/// Un-normalized record as written by a scraper.
#[derive(Debug, Clone, Deserialize)]
pub struct RawJobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    #[serde(default, alias = "search_origin")]
    pub search_url: String,
    #[serde(default)]
    pub platform: Option<String>,
}

impl JobPosting {
    /// Normalizes a raw record: trims fields, canonicalizes the URL and fills in
    /// the platform tag from the URL host when the record does not carry one.
    pub fn from_raw(raw: RawJobRecord) -> Result<Self, String> {
        let title = raw.title.trim().to_string();
        if title.is_empty() {
            return Err(format!("record for '{}' has an empty title", raw.url));
        }

        let url = canonical_job_url(&raw.url)?;
        let platform = raw
            .platform
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| detect_platform(&url).to_string());

        Ok(JobPosting {
            title,
            company: raw.company.trim().to_string(),
            location: raw.location.trim().to_string(),
            description: raw.description.trim().to_string(),
            url,
            search_origin: raw.search_url.trim().to_string(),
            platform,
        })
    }
}

/// Drops tracking parameters, the fragment and a trailing slash so
/// `?refId=…&trackingId=…` never makes one posting look like two.
/// Remaining query parameters are kept in their original order.
pub fn canonical_job_url(raw: &str) -> Result<String, String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| format!("invalid job url '{raw}': {e}"))?;
    url.set_fragment(None);

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept.iter());
    }

    let path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        url.set_path(path.trim_end_matches('/'));
    }

    Ok(url.to_string())
}

fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key) || TRACKING_PREFIXES.iter().any(|p| key.starts_with(p))
}

/// Detects the job platform from a URL's host.
pub fn detect_platform(url: &str) -> &'static str {
    let host = match Url::parse(url) {
        Ok(parsed) => parsed.host_str().map(str::to_lowercase),
        Err(_) => None,
    };

    host.and_then(|h| {
        PLATFORM_PATTERNS
            .iter()
            .find(|(pattern, _)| h.contains(pattern))
            .map(|(_, platform)| *platform)
    })
    .unwrap_or(UNKNOWN_PLATFORM)
}
