//! HTTP fetching of the target page and its linked stylesheets.
//!
//! Not a browser: one GET for the page, then up to `limit` sequential GETs
//! for `<link rel="stylesheet">` assets. No retries. Results are memoized
//! for the lifetime of the [`Fetcher`], keyed by the call's inputs.

use crate::types::{BenchError, BenchResult};
use dashmap::DashMap;
use encoding_rs::{Encoding, UTF_8};
use fnv::FnvBuildHasher;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use url::Url;

/// Successful page fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct PageFetch {
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Wall-clock time from request start to full body.
    pub elapsed: Duration,
    /// Response body size in bytes.
    pub size: usize,
    /// Response body decoded as text.
    pub html: String,
}

impl PageFetch {
    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StylesheetKey {
    html: String,
    base_url: String,
    limit: usize,
}

/// HTTP fetcher with a process-lifetime memo cache.
///
/// Cache entries are write-once: the first completed result for a key wins
/// and is never replaced. Only successful page fetches are cached.
pub struct Fetcher {
    client: reqwest::Client,
    byte_cap: usize,
    pages: DashMap<String, PageFetch, FnvBuildHasher>,
    stylesheets: DashMap<StylesheetKey, String, FnvBuildHasher>,
}

impl Fetcher {
    /// Create a fetcher sending `user_agent` and truncating each stylesheet
    /// to `byte_cap` bytes.
    pub fn new(user_agent: &str, byte_cap: usize) -> BenchResult<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            byte_cap,
            pages: DashMap::default(),
            stylesheets: DashMap::default(),
        })
    }

    /// Fetch a page. A URL without a scheme is fetched over `https://`.
    ///
    /// Fails on network errors and on any non-2xx final status.
    pub async fn fetch_page(&self, url: &str, timeout: Duration) -> BenchResult<PageFetch> {
        if let Some(hit) = self.pages.get(url) {
            tracing::debug!("page cache hit: {url}");
            return Ok(hit.value().clone());
        }

        let target = normalize_url(url)?;
        let started = Instant::now();

        let resp = self
            .client
            .get(target)
            .timeout(timeout)
            .send()
            .await?;

        let status = resp.status();
        let final_url = resp.url().to_string();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = resp.bytes().await?;
        let elapsed = started.elapsed();

        if !status.is_success() {
            return Err(BenchError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url: final_url,
            });
        }

        let page = PageFetch {
            final_url,
            status: status.as_u16(),
            elapsed,
            size: body.len(),
            html: decode_body(&body, content_type.as_deref()),
        };

        tracing::debug!(
            "fetched {} ({} bytes in {:.3}s)",
            page.final_url,
            page.size,
            page.elapsed_secs()
        );

        Ok(self
            .pages
            .entry(url.to_string())
            .or_insert(page)
            .value()
            .clone())
    }

    /// Fetch up to `limit` linked stylesheets and join their bodies with `\n`.
    ///
    /// Individual failures are skipped, so the result may be empty.
    pub async fn fetch_stylesheets(
        &self,
        html: &str,
        base_url: &str,
        limit: usize,
        timeout: Duration,
    ) -> String {
        let key = StylesheetKey {
            html: html.to_string(),
            base_url: base_url.to_string(),
            limit,
        };
        if let Some(hit) = self.stylesheets.get(&key) {
            tracing::debug!("stylesheet cache hit for {base_url}");
            return hit.value().clone();
        }

        let hrefs: Vec<String> = stylesheet_urls(html, base_url)
            .into_iter()
            .take(limit)
            .collect();

        let mut bodies = Vec::with_capacity(hrefs.len());
        for href in &hrefs {
            match self.fetch_stylesheet(href, timeout).await {
                Some(body) => bodies.push(body),
                None => tracing::debug!("skipping stylesheet {href}"),
            }
        }

        let bundle = bodies.join("\n");
        self.stylesheets.entry(key).or_insert(bundle).value().clone()
    }

    async fn fetch_stylesheet(&self, url: &str, timeout: Duration) -> Option<String> {
        let resp = self.client.get(url).timeout(timeout).send().await.ok()?;
        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            return None;
        }
        let text = resp.text().await.ok()?;
        if text.is_empty() {
            return None;
        }
        Some(truncate_to_byte_cap(text, self.byte_cap))
    }

    /// Number of memoized page fetches.
    pub fn cached_pages(&self) -> usize {
        self.pages.len()
    }

    /// Number of memoized stylesheet bundles.
    pub fn cached_stylesheets(&self) -> usize {
        self.stylesheets.len()
    }
}

fn scheme_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("scheme regex is valid"))
}

/// Whether the input starts with a `scheme://` prefix.
pub fn has_scheme(raw: &str) -> bool {
    scheme_regex().is_match(raw.trim())
}

/// Prefix `https://` when the URL has no leading scheme, then parse it.
///
/// Only a `scheme://` prefix counts, so `example.com/?next=https://x` and
/// `localhost:8080` are both fetched over `https://`.
pub fn normalize_url(raw: &str) -> BenchResult<Url> {
    let trimmed = raw.trim();
    let candidate = if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    Url::parse(&candidate).map_err(|e| BenchError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Decode a response body using the `charset` of its `Content-Type`,
/// falling back to UTF-8. A byte order mark overrides the declared charset.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_param)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

fn charset_param(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

/// Extract `<link rel="stylesheet" href="...">` targets, resolved against
/// `base_url`, in document order.
pub fn stylesheet_urls(html: &str, base_url: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        return Vec::new();
    };
    let Ok(sel) = Selector::parse("link[rel][href]") else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let urls: Vec<String> = document
        .select(&sel)
        .filter(|link| {
            link.value().attr("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case("stylesheet"))
            })
        })
        .filter_map(|link| link.value().attr("href"))
        .filter(|href| !href.is_empty())
        .filter_map(|href| base.join(href).ok())
        .map(|u| u.to_string())
        .collect();
    urls
}

/// Truncate to at most `cap` bytes without splitting a UTF-8 character.
fn truncate_to_byte_cap(mut text: String, cap: usize) -> String {
    if text.len() > cap {
        let mut end = cap;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}
