use super::{Locale, ReviewQuery, ReviewSource, Sort};
use crate::config::FetchConfig;
use crate::error::{Error, Result};
use crate::model::{AppId, AppMetadata, ReviewRecord};
use chrono::{TimeZone, Utc};
use regex::Regex;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// The review endpoint refuses larger pages.
const REVIEWS_PER_REQUEST: u32 = 200;

lazy_static::lazy_static! {
    static ref SCRIPT: Regex = Regex::new(r"AF_initDataCallback[\s\S]*?</script")
        .expect("script pattern is valid");
    static ref SCRIPT_KEY: Regex = Regex::new(r"(ds:.*?)'").expect("key pattern is valid");
    static ref SCRIPT_VALUE: Regex = Regex::new(r"data:([\s\S]*?), sideChannel: \{\}\}\);</")
        .expect("value pattern is valid");
}

/// Blocking HTTP client for the public Play Store pages.
pub struct PlayStoreClient {
    client: Client,
    base_url: String,
}

impl PlayStoreClient {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn fetch_review_page(
        &self,
        query: &ReviewQuery<'_>,
        count: u32,
        token: Option<&str>,
    ) -> Result<ReviewPage> {
        let url = format!("{}/_/PlayStoreUi/data/batchexecute", self.base_url);
        let body = review_request_body(query.app_id, query.sort, count, token);
        let text = self
            .client
            .post(&url)
            .query(&[("hl", &query.locale.lang), ("gl", &query.locale.country)])
            .form(&[("f.req", body)])
            .send()?
            .error_for_status()?
            .text()?;
        parse_review_page(&text)
    }
}

impl ReviewSource for PlayStoreClient {
    fn fetch_app(&self, app_id: &AppId, locale: &Locale) -> Result<AppMetadata> {
        let url = format!("{}/store/apps/details", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("id", app_id.as_str()),
                ("hl", locale.lang.as_str()),
                ("gl", locale.country.as_str()),
            ])
            .send()?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::Fetch(format!("app '{}' not found", app_id)));
        }
        let html = response.error_for_status()?.text()?;
        parse_app_details(&html)
    }

    fn fetch_reviews(&self, query: &ReviewQuery<'_>) -> Result<Vec<ReviewRecord>> {
        let wanted = query.count as usize;
        let mut reviews: Vec<ReviewRecord> = Vec::with_capacity(wanted);
        let mut token: Option<String> = None;

        while reviews.len() < wanted {
            let remaining = (wanted - reviews.len()) as u32;
            let page = self.fetch_review_page(
                query,
                remaining.min(REVIEWS_PER_REQUEST),
                token.as_deref(),
            )?;
            debug!(
                "Fetched {} reviews for {} (total {})",
                page.reviews.len(),
                query.app_id,
                reviews.len() + page.reviews.len()
            );
            if page.reviews.is_empty() {
                break;
            }
            reviews.extend(page.reviews);
            match page.next_token {
                Some(next) => token = Some(next),
                None => break,
            }
        }

        reviews.truncate(wanted);
        Ok(reviews)
    }
}

#[derive(Debug, Default)]
struct ReviewPage {
    reviews: Vec<ReviewRecord>,
    next_token: Option<String>,
}

fn review_request_body(app_id: &AppId, sort: Sort, count: u32, token: Option<&str>) -> String {
    let inner = json!([
        null,
        null,
        [2, sort.code(), [count, null, token], null, []],
        [app_id.as_str(), 7]
    ]);
    json!([[["UsvDTd", inner.to_string(), null, "generic"]]]).to_string()
}

fn at<'a>(value: &'a Value, path: &[usize]) -> Option<&'a Value> {
    path.iter().try_fold(value, |v, &i| v.get(i))
}

fn str_at(value: &Value, path: &[usize]) -> Option<String> {
    at(value, path).and_then(Value::as_str).map(str::to_string)
}

fn parse_review_page(body: &str) -> Result<ReviewPage> {
    let payload = body
        .trim_start()
        .strip_prefix(")]}'")
        .ok_or_else(|| Error::Fetch("unexpected review response prefix".to_string()))?;
    let envelope: Value = serde_json::from_str(payload.trim())?;

    // A missing payload string means the app has no (more) reviews.
    let Some(inner) = at(&envelope, &[0, 2]).and_then(Value::as_str) else {
        return Ok(ReviewPage::default());
    };
    let data: Value = serde_json::from_str(inner)?;

    let reviews = data
        .get(0)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(parse_review).collect())
        .unwrap_or_default();

    let next_token = data.as_array().and_then(|parts| {
        parts
            .iter()
            .rev()
            .skip(1)
            .take(1)
            .chain(parts.last())
            .filter_map(|part| part.as_array()?.last()?.as_str())
            .next()
            .map(str::to_string)
    });

    Ok(ReviewPage {
        reviews,
        next_token,
    })
}

fn parse_review(item: &Value) -> Option<ReviewRecord> {
    let Some(posted_secs) = at(item, &[5, 0]).and_then(Value::as_i64) else {
        warn!("Skipping review without timestamp: {:?}", item.get(0));
        return None;
    };
    let posted_at = Utc.timestamp_opt(posted_secs, 0).single()?;

    Some(ReviewRecord {
        review_id: str_at(item, &[0]),
        user_name: str_at(item, &[1, 0]).unwrap_or_default(),
        content: str_at(item, &[4]).unwrap_or_default(),
        posted_at,
        rating: at(item, &[2]).and_then(Value::as_u64).unwrap_or(0).min(5) as u8,
    })
}

fn parse_app_details(html: &str) -> Result<AppMetadata> {
    let data = SCRIPT
        .find_iter(html)
        .filter(|script| {
            SCRIPT_KEY
                .captures(script.as_str())
                .is_some_and(|caps| &caps[1] == "ds:5")
        })
        .find_map(|script| SCRIPT_VALUE.captures(script.as_str()))
        .ok_or_else(|| Error::Fetch("app details block not found in page".to_string()))?;
    let details: Value = serde_json::from_str(&data[1])?;

    let title = str_at(&details, &[1, 2, 0, 0])
        .ok_or_else(|| Error::Fetch("app details have no title".to_string()))?;

    Ok(AppMetadata {
        title,
        developer: str_at(&details, &[1, 2, 68, 0]).unwrap_or_default(),
        genre: str_at(&details, &[1, 2, 79, 0, 0, 0]).unwrap_or_default(),
        icon_url: str_at(&details, &[1, 2, 95, 0, 3, 2]).unwrap_or_default(),
        score: at(&details, &[1, 2, 51, 0, 1]).and_then(Value::as_f64),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review_json(id: &str, user: &str, content: &str, score: u64, posted: i64) -> Value {
        json!([
            id,
            [user, [null, null, null, [null, null, "https://img/u"]]],
            score,
            null,
            content,
            [posted, 0],
            3,
            null,
            null,
            null,
            "1.2.3"
        ])
    }

    fn response(data: Value) -> String {
        let envelope = json!([["wrb.fr", "UsvDTd", data.to_string(), null, null, null, "generic"]]);
        format!(")]}}'\n\n{}\n", envelope)
    }

    #[test]
    fn test_request_body_first_page() {
        let body = review_request_body(&AppId::new("com.example"), Sort::Newest, 50, None);
        let outer: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(outer[0][0][0], "UsvDTd");
        let inner: Value = serde_json::from_str(outer[0][0][1].as_str().unwrap()).unwrap();
        assert_eq!(inner[2][1], 2);
        assert_eq!(inner[2][2], json!([50, null, null]));
        assert_eq!(inner[3], json!(["com.example", 7]));
    }

    #[test]
    fn test_request_body_with_token() {
        let body = review_request_body(&AppId::new("com.example"), Sort::Newest, 200, Some("abc"));
        let outer: Value = serde_json::from_str(&body).unwrap();
        let inner: Value = serde_json::from_str(outer[0][0][1].as_str().unwrap()).unwrap();
        assert_eq!(inner[2][2], json!([200, null, "abc"]));
    }

    #[test]
    fn test_parse_review_page() {
        let data = json!([
            [
                review_json("gp:1", "Budi", "Mantap!", 5, 1_700_000_000),
                review_json("gp:2", "Sari", "Sering crash", 1, 1_700_086_400)
            ],
            [null, "next-token"],
            null
        ]);
        let page = parse_review_page(&response(data)).unwrap();
        assert_eq!(page.reviews.len(), 2);
        assert_eq!(page.reviews[0].user_name, "Budi");
        assert_eq!(page.reviews[0].content, "Mantap!");
        assert_eq!(page.reviews[0].rating, 5);
        assert_eq!(page.reviews[0].review_id.as_deref(), Some("gp:1"));
        assert_eq!(page.reviews[1].posted_at.timestamp(), 1_700_086_400);
        assert_eq!(page.next_token.as_deref(), Some("next-token"));
    }

    #[test]
    fn test_parse_last_page_without_token() {
        let data = json!([[review_json("gp:1", "Budi", "Oke", 4, 1_700_000_000)], null]);
        let page = parse_review_page(&response(data)).unwrap();
        assert_eq!(page.reviews.len(), 1);
        assert_eq!(page.next_token, None);
    }

    #[test]
    fn test_parse_empty_payload() {
        let body = ")]}'\n\n[[\"wrb.fr\",\"UsvDTd\",null,null,null,[5],\"generic\"]]";
        let page = parse_review_page(body).unwrap();
        assert!(page.reviews.is_empty());
        assert!(page.next_token.is_none());
    }

    #[test]
    fn test_parse_rejects_unexpected_body() {
        assert!(parse_review_page("<html>blocked</html>").is_err());
    }

    #[test]
    fn test_review_with_null_content() {
        let mut item = review_json("gp:3", "Anon", "", 3, 1_700_000_000);
        item[4] = Value::Null;
        let review = parse_review(&item).unwrap();
        assert_eq!(review.content, "");
    }

    #[test]
    fn test_parse_app_details() {
        let mut app = vec![Value::Null; 96];
        app[0] = json!(["Mobile Legends: Bang Bang"]);
        app[51] = json!([[null, 4.1]]);
        app[68] = json!(["Moonton"]);
        app[79] = json!([[["Action"]]]);
        app[95] = json!([[null, null, null, [null, null, "https://img/icon.png"]]]);
        let details = json!([null, [null, null, app]]);
        let html = format!(
            "<script nonce=\"x\">AF_initDataCallback({{key: 'ds:4', hash: '1', data:[1], sideChannel: {{}}}});</script>\
             <script nonce=\"x\">AF_initDataCallback({{key: 'ds:5', hash: '2', data:{}, sideChannel: {{}}}});</script>",
            details
        );

        let meta = parse_app_details(&html).unwrap();
        assert_eq!(meta.title, "Mobile Legends: Bang Bang");
        assert_eq!(meta.developer, "Moonton");
        assert_eq!(meta.genre, "Action");
        assert_eq!(meta.icon_url, "https://img/icon.png");
        assert_eq!(meta.score, Some(4.1));
    }

    #[test]
    fn test_parse_app_details_missing_block() {
        assert!(parse_app_details("<html></html>").is_err());
    }
}
