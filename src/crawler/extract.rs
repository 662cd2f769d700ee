use log::warn;
use scraper::{Html, Selector};
use time::OffsetDateTime;
use url::Url;

use crate::types::{Category, Entry};

pub const SITE_HOST: &str = "superkts.com";
pub const SITE_ORIGIN: &str = "https://superkts.com";
pub const DIRECTORY_BASE: &str = "https://superkts.com/cal/";

/// Links with longer visible text are navigation chrome or inline prose,
/// not directory items.
const MAX_TITLE_CHARS: usize = 100;

const AGE_KEYWORDS: &[&str] = &["나이", "띠", "만나이", "성년", "동갑"];
const DATE_KEYWORDS: &[&str] = &["날짜", "디데이", "기념일", "음력", "양력", "100일"];
const STATS_KEYWORDS: &[&str] = &["통계", "인구", "임금", "로또"];

/// Walk every anchor in document order and produce one classified [`Entry`]
/// per admitted link. Entries of one run all carry the same `observed_at`.
pub fn extract(document: &str, observed_at: OffsetDateTime) -> Vec<Entry> {
    let html = Html::parse_document(document);
    let anchors = Selector::parse("a").unwrap();

    let mut entries = Vec::new();
    for element in html.select(&anchors) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let text = element.text().collect::<String>();
        let text = text.trim();

        if href.is_empty() || text.is_empty() || text.chars().count() >= MAX_TITLE_CHARS {
            continue;
        }
        let Some(url) = normalize_href(href) else {
            continue;
        };

        entries.push(Entry {
            category: classify(text),
            title: text.to_owned(),
            url,
            description: None,
            observed_at,
        });
    }

    entries
}

/// Resolve `href` to an absolute same-site URL, or `None` for links that
/// leave the site (cross-domain, mailto and friends).
fn normalize_href(href: &str) -> Option<String> {
    if href.starts_with('/') {
        return Some(format!("{SITE_ORIGIN}{href}"));
    }

    match Url::parse(href) {
        Ok(url) => (url.host_str() == Some(SITE_HOST)).then(|| url.to_string()),
        // Bare relative paths live under the directory itself.
        Err(url::ParseError::RelativeUrlWithoutBase) => Some(format!("{DIRECTORY_BASE}{href}")),
        Err(err) => {
            warn!("[Extract] Skipping unparseable href {href}: {err}");
            None
        }
    }
}

/// Keyword taxonomy of the directory. First matching set wins, so a title
/// carrying both an age and a statistics keyword classifies as age.
pub fn classify(text: &str) -> Category {
    let lower = text.to_lowercase();

    if AGE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Category::AgeOrZodiac
    } else if DATE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Category::DateRelated
    } else if STATS_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Category::Statistics
    } else {
        Category::Other
    }
}
