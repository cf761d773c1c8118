use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A saved reference to a URL.
///
/// Serialized field names match the durable slot format:
/// `id`, `title`, `url`, `tags`, `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(serialize_with = "serialize_created_at")]
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    /// Returns `true` if the bookmark carries `tag` exactly (case-sensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Creation date for list rendering, e.g. `Jan 5, 2024`.
    pub fn display_date(&self) -> String {
        self.created_at.format("%b %-d, %Y").to_string()
    }
}

/// Millisecond precision with a `Z` suffix, e.g. `2024-01-05T09:30:00.000Z`.
/// Finer stored values keep every digit so a save never alters them.
fn serialize_created_at<S>(created_at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let format = if created_at.timestamp_subsec_nanos() % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else {
        SecondsFormat::AutoSi
    };
    serializer.serialize_str(&created_at.to_rfc3339_opts(format, true))
}

/// Accepts both string ids and the integer ids written by older collections.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}
