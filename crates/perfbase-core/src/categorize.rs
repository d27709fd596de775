//! Groups request URLs into readable categories without any configuration.

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

pub const STATIC_ASSET: &str = "Static Asset";
pub const GENERAL: &str = "General";

/// Path extensions that always mark a request as a static asset
const STATIC_EXTENSIONS: &[&str] = &[
    "js", "css", "png", "jpg", "jpeg", "gif", "svg", "ico", "woff", "woff2", "ttf", "eot", "map",
];

/// Path segments that wrap the interesting part of a route
const WRAPPER_SEGMENTS: &[&str] = &[
    "api", "v1", "v2", "v3", "v4", "rest", "web", "app", "public", "private", "internal",
    "external",
];

lazy_static! {
    static ref EXTENSION_SUFFIX: Regex = Regex::new(r"\.[^.]+$").unwrap();
    static ref CAMEL_BOUNDARY: Regex = Regex::new(r"([a-z])([A-Z])").unwrap();
}

/// Categorize a URL string.
///
/// Total: strings that are not absolute URLs are treated as a bare path.
pub fn categorize(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => categorize_url(&parsed),
        Err(_) => {
            let path = url.split(['?', '#']).next().unwrap_or_default();
            categorize_path(path)
        }
    }
}

pub fn categorize_url(url: &Url) -> String {
    categorize_path(url.path())
}

/// Categorize a URL path such as `/api/v2/billing/invoice.json`
pub fn categorize_path(path: &str) -> String {
    if is_static_asset(path) {
        return STATIC_ASSET.to_string();
    }

    let seed = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .find(|segment| !WRAPPER_SEGMENTS.contains(&segment.to_lowercase().as_str()));

    match seed.map(normalize_seed) {
        Some(label) if !label.is_empty() => label,
        _ => GENERAL.to_string(),
    }
}

/// The text after the last `.` of the path, compared case-insensitively
fn is_static_asset(path: &str) -> bool {
    path.rsplit_once('.').is_some_and(|(_, ext)| {
        let ext = ext.to_lowercase();
        STATIC_EXTENSIONS.contains(&ext.as_str())
    })
}

/// `user_accountSettings.html` -> `User Account Settings`
fn normalize_seed(segment: &str) -> String {
    let stem = EXTENSION_SUFFIX.replace(segment, "");
    let spaced = stem.replace(['-', '_'], " ");
    let split = CAMEL_BOUNDARY.replace_all(&spaced, "$1 $2");

    split
        .split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
