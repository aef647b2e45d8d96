// API client module: a small blocking HTTP client for the Thoth REST API.
// Every call returns the parsed JSON body untouched; turning it into text
// is the job of the `format` module.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::Value;

/// Header carrying the API key on every request (`X-API-Key`).
pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP Error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Request failed: invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid base URL {url}: {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("API key contains characters that cannot be sent in a header")]
    InvalidApiKey,
}

/// Blocking client holding the reqwest client (with the auth headers
/// preset) and the API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

/// Requested length of the generated content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Length {
    Short,
    #[default]
    Medium,
    Long,
}

/// Body of `POST /v1/posts`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub content: String,
    pub platforms: Vec<String>,
    pub create_image: bool,
    pub length: Length,
    pub create_hashtags: bool,
    pub post_to_social_networks: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_time: Option<String>,
}

impl CreatePost {
    /// A post with the API defaults: no image, medium length, no hashtags
    /// and no publishing to connected accounts.
    pub fn new(content: impl Into<String>, platforms: Vec<String>) -> Self {
        CreatePost {
            content: content.into(),
            platforms,
            create_image: false,
            length: Length::default(),
            create_hashtags: false,
            post_to_social_networks: false,
            schedule_time: None,
        }
    }
}

/// Query of `GET /v1/posts`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListPosts {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl Default for ListPosts {
    fn default() -> Self {
        ListPosts {
            page: 1,
            limit: 10,
            status: None,
        }
    }
}

/// Body of `PUT /v1/posts/{id}`. Only the fields that are set are sent.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_contents: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ApiClient {
    /// Build a client for `base_url` that authenticates with `api_key`.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, Error> {
        let base_url = Url::parse(base_url).map_err(|e| Error::BaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::BaseUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical URL".into(),
            });
        }

        let mut key = HeaderValue::from_str(api_key).map_err(|_| Error::InvalidApiKey)?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .user_agent(concat!("thoth-cli/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;
        Ok(ApiClient { client, base_url })
    }

    /// Base URL the client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `segments` to the base URL path, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        tracing::debug!(%method, path = url.path(), "sending request");
        self.client.request(method, url)
    }

    /// Send the request; any non-2xx status becomes `Error::Http` carrying
    /// the response text.
    fn send(&self, req: RequestBuilder) -> Result<Value, Error> {
        let res = req.send()?;
        let status = res.status();
        tracing::debug!(status = status.as_u16(), "received response");
        let text = res.text()?;
        if !status.is_success() {
            tracing::info!(status = status.as_u16(), "request rejected by the API");
            return Err(Error::Http {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Create an optimized post for one or more platforms.
    pub fn create_post(&self, post: &CreatePost) -> Result<Value, Error> {
        self.send(self.request(Method::POST, &["v1", "posts"]).json(post))
    }

    /// Fetch a post by id.
    pub fn get_post(&self, post_id: &str) -> Result<Value, Error> {
        self.send(self.request(Method::GET, &["v1", "posts", post_id]))
    }

    /// List posts, one page at a time.
    pub fn list_posts(&self, query: &ListPosts) -> Result<Value, Error> {
        self.send(self.request(Method::GET, &["v1", "posts"]).query(query))
    }

    /// Update an existing post.
    pub fn update_post(&self, post_id: &str, update: &UpdatePost) -> Result<Value, Error> {
        self.send(
            self.request(Method::PUT, &["v1", "posts", post_id])
                .json(update),
        )
    }

    pub fn get_brand_styles(&self) -> Result<Value, Error> {
        self.send(self.request(Method::GET, &["v1", "brand-styles"]))
    }

    pub fn get_brand_style(&self, style_id: &str) -> Result<Value, Error> {
        self.send(self.request(Method::GET, &["v1", "brand-styles", style_id]))
    }
}
