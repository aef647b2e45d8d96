// Output formatting: turns a parsed API response into text.
//
// Each endpoint declares the `Shape` of data it answers with. The body's
// `data` member is decoded into the typed view for that shape; when it
// does not fit, the data is printed back as JSON.

use std::fmt;

use serde::Deserialize;
use serde_json::{Map, Value};

/// Response shape expected from an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// A single post (create, get and update).
    Post,
    /// A page of posts.
    PostList,
    /// Every brand style of the account.
    BrandStyles,
    /// A single brand style.
    BrandStyle,
}

/// Render `body` as text. With `json` set the whole body is printed as
/// indented JSON.
pub fn render(body: &Value, shape: Shape, json: bool) -> Result<String, serde_json::Error> {
    if json {
        return serde_json::to_string_pretty(body);
    }
    Ok(Reply::from_body(body, shape).to_string())
}

/// A response decoded according to its endpoint's shape.
#[derive(Debug)]
pub enum Reply {
    /// `success` was not set; carries the API's error message.
    Failure(String),
    Post(Post),
    PostList(PostPage),
    BrandStyles(Vec<BrandStyleSummary>),
    BrandStyle(BrandStyle),
    /// Data that did not match the expected shape.
    Raw(Value),
}

impl Reply {
    pub fn from_body(body: &Value, shape: Shape) -> Self {
        let Some(envelope) = body.as_object() else {
            return Reply::Failure("Unknown error".into());
        };
        if !envelope.get("success").map_or(false, truthy) {
            let message = match envelope.get("error") {
                None | Some(Value::Null) => "Unknown error".to_string(),
                Some(err) => plain(err),
            };
            return Reply::Failure(message);
        }

        let data = envelope
            .get("data")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        let decoded = match shape {
            Shape::Post => Post::deserialize(&data)
                .ok()
                .filter(|post| post.post_id.is_some() || post.id.is_some())
                .map(Reply::Post),
            Shape::PostList => PostPage::deserialize(&data).ok().map(Reply::PostList),
            Shape::BrandStyles => Vec::<BrandStyleSummary>::deserialize(&data)
                .ok()
                .map(Reply::BrandStyles),
            Shape::BrandStyle => BrandStyle::deserialize(&data).ok().map(Reply::BrandStyle),
        };
        decoded.unwrap_or_else(|| {
            tracing::debug!(?shape, "response data did not match the expected shape");
            Reply::Raw(data)
        })
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Failure(message) => write!(f, "Error: {message}"),
            Reply::Post(post) => f.write_str(&post.lines().join("\n")),
            Reply::PostList(page) => f.write_str(&page.lines().join("\n")),
            Reply::BrandStyles(styles) => {
                let mut out = vec![format!("Brand Styles ({}):", styles.len())];
                for style in styles {
                    out.push(format!("\nID: {}", or_na(&style.id)));
                    out.push(format!("  Name: {}", plain_or(&style.name, "N/A")));
                    out.push(format!("  Mode: {}", plain_or(&style.content_mode, "N/A")));
                    if style.is_default.as_ref().map_or(false, Flag::is_set) {
                        out.push("  (Default)".into());
                    }
                }
                f.write_str(&out.join("\n"))
            }
            Reply::BrandStyle(style) => f.write_str(&style.lines().join("\n")),
            Reply::Raw(data) => {
                let text = serde_json::to_string_pretty(data).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

/// Identifier sent either as a string or a number.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Id {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Text(s) => f.write_str(s),
            Id::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Boolean the API sometimes sends as a string.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
    Other(Value),
}

impl Flag {
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Text(s) => s == "true",
            Flag::Other(_) => false,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub post_id: Option<Id>,
    pub id: Option<Id>,
    pub original_content: Option<Value>,
    pub platform_contents: Option<Map<String, Value>>,
    pub status: Option<Value>,
    pub schedule_time: Option<Value>,
}

/// Per-platform content: either `{content, hashtags}` or a bare value.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum PlatformContent {
    Detailed {
        #[serde(default)]
        content: Option<String>,
        #[serde(default)]
        hashtags: Option<Vec<String>>,
    },
    Plain(Value),
}

impl Post {
    fn lines(&self) -> Vec<String> {
        let id = self.post_id.as_ref().or(self.id.as_ref());
        let mut out = vec![format!("Post ID: {}", or_na(&id.cloned()))];

        if let Some(content) = &self.original_content {
            out.push(format!("\nOriginal Content:\n{}", plain(content)));
        }

        if let Some(platforms) = &self.platform_contents {
            out.push("\nPlatform-Specific Content:".into());
            for (platform, value) in platforms {
                out.push(format!("\n  {}:", platform.to_uppercase()));
                match PlatformContent::deserialize(value) {
                    Ok(PlatformContent::Detailed { content, hashtags }) => {
                        out.push(format!("    {}", content.unwrap_or_default()));
                        if let Some(tags) = hashtags.filter(|t| !t.is_empty()) {
                            let tags: Vec<String> = tags.iter().map(|t| format!("#{t}")).collect();
                            out.push(format!("    Hashtags: {}", tags.join(" ")));
                        }
                    }
                    _ => out.push(format!("    {}", plain(value))),
                }
            }
        }

        if let Some(status) = &self.status {
            out.push(format!("\nStatus: {}", plain(status)));
        }
        if let Some(when) = &self.schedule_time {
            out.push(format!("Scheduled: {}", plain(when)));
        }
        out
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct PostPage {
    pub posts: Vec<PostSummary>,
    #[serde(default)]
    pub pagination: Option<Value>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: Option<Id>,
    pub title: Option<Value>,
    pub status: Option<Value>,
    pub created_at: Option<Value>,
}

impl PostPage {
    fn lines(&self) -> Vec<String> {
        let total = self
            .pagination
            .as_ref()
            .and_then(|p| p.get("total"))
            .filter(|total| !total.is_null())
            .map_or_else(|| self.posts.len().to_string(), plain);
        let mut out = vec![format!("Total Posts: {total}"), String::new()];
        for post in &self.posts {
            out.push(format!("ID: {}", or_na(&post.id)));
            if let Some(title) = &post.title {
                out.push(format!("  Title: {}", plain(title)));
            }
            out.push(format!("  Status: {}", plain_or(&post.status, "unknown")));
            out.push(format!("  Created: {}", plain_or(&post.created_at, "N/A")));
            out.push(String::new());
        }
        out
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandStyleSummary {
    pub id: Option<Id>,
    pub name: Option<Value>,
    pub content_mode: Option<Value>,
    pub is_default: Option<Flag>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandStyle {
    pub id: Option<Id>,
    // `name` and `contentMode` must be present; they mark a brand style
    pub name: Value,
    pub content_mode: Value,
    pub is_default: Option<Flag>,
    pub colors: Option<Map<String, Value>>,
    pub tone: Option<Map<String, Value>>,
    pub created_at: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BrandStyle {
    fn lines(&self) -> Vec<String> {
        let mut out = vec![
            format!("Brand Style: {}", plain(&self.name)),
            format!("ID: {}", or_na(&self.id)),
            format!("Content Mode: {}", plain(&self.content_mode)),
        ];

        if self.is_default.as_ref().map_or(false, Flag::is_set) {
            out.push("Default: ✓ (automatically applied to new posts)".into());
        }

        if let Some(colors) = &self.colors {
            out.push("\nBrand Colors:".into());
            for (key, value) in colors {
                out.push(format!("  {key}: {}", plain(value)));
            }
            out.push("  (Used for AI image generation)".into());
        }

        if let Some(tone) = &self.tone {
            out.push("\nBrand Tone:".into());
            for (key, value) in tone {
                out.push(format!("  {}: {}", capitalize(key), plain(value)));
            }
            out.push("  (Applied to all written content)".into());
        }

        if let Some(created) = &self.created_at {
            out.push(format!("\nCreated: {}", plain(created)));
        }

        if !self.extra.is_empty() {
            out.push("\nAdditional Properties:".into());
            let mut fields: Vec<_> = self.extra.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            for (field, value) in fields {
                out.push(format!("  {field}: {}", plain(value)));
            }
        }
        out
    }
}

/// Strings print bare, everything else as compact JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn plain_or(value: &Option<Value>, default: &str) -> String {
    value.as_ref().map_or_else(|| default.to_string(), plain)
}

fn or_na<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "N/A".to_string(), ToString::to_string)
}

/// Upper-case the first character, lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
