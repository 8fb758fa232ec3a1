//! Quote and name-day providers.
//!
//! Both fetch once, independently, and never surface an error: any failure
//! is replaced by a fixed fallback value. Results are delivered to the UI
//! through a channel as `ContentUpdate`s.

use std::future::Future;

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

const QUOTE_PLACEHOLDER: &str = "Loading quote...";
const FALLBACK_QUOTE_TEXT: &str = "Quality is not an act, it is a habit.";
const FALLBACK_QUOTE_AUTHOR: &str = "Aristotle";

pub const DEFAULT_RELAY_URL: &str = "https://api.allorigins.win/get?url=";
pub const DEFAULT_QUOTE_URL: &str = "https://zenquotes.io/api/random";
pub const DEFAULT_NAMEDAY_URL: &str = "https://nameday.abalin.net/api/V1/today";
pub const DEFAULT_COUNTRY: &str = "pl";

/// Errors from a single content fetch. Never shown to the user.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response is missing {0}")]
    Missing(&'static str),
}

/// Quote text and its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Quote {
    /// Shown until the fetch resolves.
    pub fn placeholder() -> Self {
        Quote {
            text: QUOTE_PLACEHOLDER.to_string(),
            author: String::new(),
        }
    }

    /// Shown when the fetch fails.
    pub fn fallback() -> Self {
        Quote {
            text: FALLBACK_QUOTE_TEXT.to_string(),
            author: FALLBACK_QUOTE_AUTHOR.to_string(),
        }
    }
}

/// Today's date plus the names celebrating today.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateInfo {
    pub date: String,
    pub names: String,
}

impl DateInfo {
    pub fn date_only(today: NaiveDate) -> Self {
        DateInfo {
            date: format_date(today),
            names: String::new(),
        }
    }

    pub fn with_names(today: NaiveDate, names: impl Into<String>) -> Self {
        DateInfo {
            date: format_date(today),
            names: names.into(),
        }
    }
}

/// Polish locale short date, e.g. `19.10.2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Endpoints and locale for the providers.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    pub relay_url: String,
    pub quote_url: String,
    pub nameday_url: String,
    /// Key of the name list inside the name-day payload.
    pub country: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            nameday_url: DEFAULT_NAMEDAY_URL.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl ContentConfig {
    /// The quote API address routed through the CORS relay.
    pub fn quote_request_url(&self) -> String {
        format!("{}{}", self.relay_url, urlencoding::encode(&self.quote_url))
    }
}

/// A resolved display value, sent from a provider task to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentUpdate {
    Quote(Quote),
    Date(DateInfo),
}

/// Decode the relay envelope `{"contents": "<json>"}` holding `[{"q", "a"}, ...]`.
pub fn parse_quote_envelope(body: &str) -> Result<Quote, ContentError> {
    #[derive(Deserialize)]
    struct Envelope {
        contents: Option<String>,
    }
    #[derive(Deserialize)]
    struct ZenQuote {
        q: String,
        a: String,
    }

    let envelope: Envelope = serde_json::from_str(body)?;
    let contents = envelope.contents.ok_or(ContentError::Missing("contents"))?;
    let quotes: Vec<ZenQuote> = serde_json::from_str(&contents)?;
    let first = quotes.into_iter().next().ok_or(ContentError::Missing("quote"))?;
    Ok(Quote {
        text: first.q,
        author: first.a,
    })
}

/// Pull `nameday.<country>` out of the name-day payload.
pub fn parse_nameday(body: &str, country: &str) -> Result<String, ContentError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    value
        .get("nameday")
        .and_then(|n| n.get(country))
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or(ContentError::Missing("nameday"))
}

async fn get_text(client: &reqwest::Client, url: &str) -> Result<String, ContentError> {
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(ContentError::Status(resp.status().as_u16()));
    }
    Ok(resp.text().await?)
}

pub async fn fetch_quote(client: &reqwest::Client, config: &ContentConfig) -> Result<Quote, ContentError> {
    let body = get_text(client, &config.quote_request_url()).await?;
    parse_quote_envelope(&body)
}

pub async fn fetch_names(client: &reqwest::Client, config: &ContentConfig) -> Result<String, ContentError> {
    let body = get_text(client, &config.nameday_url).await?;
    parse_nameday(&body, &config.country)
}

/// Await `fut`, replacing any error with `fallback()`.
pub async fn or_fallback<T, F>(what: &str, fut: F, fallback: impl FnOnce() -> T) -> T
where
    F: Future<Output = Result<T, ContentError>>,
{
    match fut.await {
        Ok(value) => {
            debug!(what, "content fetched");
            value
        }
        Err(e) => {
            warn!(what, error = %e, "content fetch failed, using fallback");
            fallback()
        }
    }
}

pub async fn load_quote(client: &reqwest::Client, config: &ContentConfig) -> Quote {
    or_fallback("quote", fetch_quote(client, config), Quote::fallback).await
}

pub async fn load_date_info(client: &reqwest::Client, config: &ContentConfig, today: NaiveDate) -> DateInfo {
    or_fallback(
        "nameday",
        async { fetch_names(client, config).await.map(|names| DateInfo::with_names(today, names)) },
        || DateInfo::date_only(today),
    )
    .await
}

/// Start both providers on `handle`. Each sends exactly one update.
pub fn spawn_providers(handle: &Handle, config: ContentConfig, tx: UnboundedSender<ContentUpdate>) {
    let client = reqwest::Client::new();

    let quote_client = client.clone();
    let quote_config = config.clone();
    let quote_tx = tx.clone();
    handle.spawn(async move {
        let quote = load_quote(&quote_client, &quote_config).await;
        // The UI may already be gone; the result is simply dropped then.
        let _ = quote_tx.send(ContentUpdate::Quote(quote));
    });

    handle.spawn(async move {
        let today = Local::now().date_naive();
        let info = load_date_info(&client, &config, today).await;
        let _ = tx.send(ContentUpdate::Date(info));
    });
}

/// Values used when fetching is disabled.
pub fn offline_updates(today: NaiveDate) -> [ContentUpdate; 2] {
    [
        ContentUpdate::Quote(Quote::fallback()),
        ContentUpdate::Date(DateInfo::date_only(today)),
    ]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    #[test]
    fn test_parse_quote_envelope() {
        let body = r#"{"contents":"[{\"q\":\"Stay hungry.\",\"a\":\"Steve Jobs\",\"h\":\"<blockquote/>\"}]","status":{"http_code":200}}"#;
        let quote = parse_quote_envelope(body).unwrap();
        assert_eq!(
            quote,
            Quote {
                text: "Stay hungry.".to_string(),
                author: "Steve Jobs".to_string()
            }
        );
    }

    #[test]
    fn test_parse_quote_envelope_rejects_bad_shapes() {
        let bad = [
            "not json",
            r#"{"status":{}}"#,
            r#"{"contents":null}"#,
            r#"{"contents":"<html>rate limited</html>"}"#,
            r#"{"contents":"[]"}"#,
            r#"{"contents":"[{\"q\":\"no author\"}]"}"#,
        ];
        for body in bad {
            assert!(parse_quote_envelope(body).is_err(), "{body}");
        }
    }

    #[test]
    fn test_parse_nameday() {
        let body = r#"{"day":7,"month":3,"nameday":{"pl":"Tomasz, Felicyta","cz":"Tomáš"}}"#;
        assert_eq!(parse_nameday(body, "pl").unwrap(), "Tomasz, Felicyta");
        assert_eq!(parse_nameday(body, "cz").unwrap(), "Tomáš");
        assert!(parse_nameday(body, "sk").is_err());
        assert!(parse_nameday(r#"{"nameday":{"pl":3}}"#, "pl").is_err());
        assert!(parse_nameday("[]", "pl").is_err());
    }

    #[test]
    fn test_date_values() {
        assert_eq!(format_date(day()), "07.03.2026");
        assert_eq!(
            DateInfo::with_names(day(), "Tomasz"),
            DateInfo {
                date: "07.03.2026".to_string(),
                names: "Tomasz".to_string()
            }
        );
        assert!(DateInfo::date_only(day()).names.is_empty());
    }

    #[test]
    fn test_quote_request_url_is_encoded() {
        let config = ContentConfig::default();
        assert_eq!(
            config.quote_request_url(),
            "https://api.allorigins.win/get?url=https%3A%2F%2Fzenquotes.io%2Fapi%2Frandom"
        );
    }

    #[tokio::test]
    async fn test_rejected_quote_uses_fallback_pair() {
        let quote = or_fallback("quote", async { Err(ContentError::Status(503)) }, Quote::fallback).await;
        assert_eq!(quote.text, "Quality is not an act, it is a habit.");
        assert_eq!(quote.author, "Aristotle");
    }

    #[tokio::test]
    async fn test_successful_fetch_passes_through() {
        let quote = or_fallback(
            "quote",
            async { Ok(Quote { text: "t".to_string(), author: "a".to_string() }) },
            Quote::fallback,
        )
        .await;
        assert_eq!(quote.author, "a");
    }

    #[tokio::test]
    async fn test_unreachable_endpoints_fall_back() {
        let config = ContentConfig {
            relay_url: "http://127.0.0.1:9/get?url=".to_string(),
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            nameday_url: "http://127.0.0.1:9/today".to_string(),
            country: DEFAULT_COUNTRY.to_string(),
        };
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        assert_eq!(load_quote(&client, &config).await, Quote::fallback());
        assert_eq!(load_date_info(&client, &config, day()).await, DateInfo::date_only(day()));
    }

    #[tokio::test]
    async fn test_providers_send_one_update_each() {
        let config = ContentConfig {
            relay_url: "http://127.0.0.1:9/get?url=".to_string(),
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            nameday_url: "http://127.0.0.1:9/today".to_string(),
            country: DEFAULT_COUNTRY.to_string(),
        };
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        spawn_providers(&Handle::current(), config, tx);

        let mut quotes = Vec::new();
        let mut dates = Vec::new();
        while let Some(update) = rx.recv().await {
            match update {
                ContentUpdate::Quote(quote) => quotes.push(quote),
                ContentUpdate::Date(info) => dates.push(info),
            }
        }

        assert_eq!(quotes, vec![Quote::fallback()]);
        assert_eq!(dates.len(), 1);
        assert!(!dates[0].date.is_empty());
        assert!(dates[0].names.is_empty());
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_offline_updates() {
        let [quote, date] = offline_updates(day());
        assert_eq!(quote, ContentUpdate::Quote(Quote::fallback()));
        assert_eq!(date, ContentUpdate::Date(DateInfo::date_only(day())));
    }
}
