use std::time::Duration;

use bytes::BytesMut;
use futures_util::StreamExt;
use jokebox_core::Joke;
use jokebox_logging::{jokebox_debug, jokebox_trace};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use url::Url;

use crate::{FailureKind, FetchError};

pub const DEFAULT_API_BASE: &str = "https://api.chucknorris.io/jokes";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
            allowed_content_types: vec!["application/json".to_string()],
        }
    }
}

impl FetchSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Remote collaborator that hands out jokes and category names.
#[async_trait::async_trait]
pub trait JokeSource: Send + Sync {
    /// A random joke, restricted to `category` when given.
    async fn random(&self, category: Option<&str>) -> Result<Joke, FetchError>;

    async fn categories(&self) -> Result<Vec<String>, FetchError>;
}

/// Wire shape of a joke record. Extra fields (`icon_url`, `url`, ...) are ignored.
#[derive(Debug, Deserialize)]
struct JokeRecord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    categories: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestJokeSource {
    settings: FetchSettings,
    base: Url,
    client: reqwest::Client,
}

impl ReqwestJokeSource {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let base = parse_base(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base,
            client,
        })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    fn endpoint(&self, segment: &str) -> Result<Url, FetchError> {
        self.base
            .join(segment)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        jokebox_debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        jokebox_trace!("received {} bytes", body.len());
        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl JokeSource for ReqwestJokeSource {
    async fn random(&self, category: Option<&str>) -> Result<Joke, FetchError> {
        let mut url = self.endpoint("random")?;
        if let Some(category) = category {
            url.query_pairs_mut().append_pair("category", category);
        }
        let body = self.get_bytes(url).await?;
        decode_joke(&body, category)
    }

    async fn categories(&self) -> Result<Vec<String>, FetchError> {
        let url = self.endpoint("categories")?;
        let body = self.get_bytes(url).await?;
        serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))
    }
}

/// Parses the configured origin so that `join("random")` lands under it.
fn parse_base(raw: &str) -> Result<Url, FetchError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{raw}: {err}")))?;
    if url.cannot_be_a_base() {
        return Err(FetchError::new(
            FailureKind::InvalidUrl,
            format!("{raw}: cannot be used as a base url"),
        ));
    }
    Ok(url)
}

/// Decodes one joke record; both `id` and `value` are required.
///
/// For category requests an empty body or a record missing either field is an
/// empty result rather than a decode failure.
pub(crate) fn decode_joke(body: &[u8], category: Option<&str>) -> Result<Joke, FetchError> {
    let empty_result = |category: &str| {
        FetchError::new(
            FailureKind::EmptyCategoryResult {
                category: category.to_string(),
            },
            format!("no joke found in category {category}"),
        )
    };

    if let Some(category) = category {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(empty_result(category));
        }
    }

    let record: Option<JokeRecord> = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

    match record {
        Some(JokeRecord {
            id: Some(id),
            value: Some(value),
            categories,
        }) if !id.is_empty() => Ok(Joke {
            id,
            value,
            categories,
        }),
        _ => Err(match category {
            Some(category) => empty_result(category),
            None => FetchError::new(FailureKind::Decode, "joke record without id or value"),
        }),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
