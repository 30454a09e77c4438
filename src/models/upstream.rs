use serde::{Deserialize, Deserializer};

/// Body returned by the upstream pages endpoint. A missing `data` array is a
/// decoding failure, not an empty result.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamResponse {
    pub data: Vec<UpstreamPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamPage {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default)]
    pub featuredimage: Option<FeaturedImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeaturedImage {
    #[serde(default)]
    pub url: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
