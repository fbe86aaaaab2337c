use serde::{Deserialize, Serialize};

/// Payload of `GET /user/info`.
///
/// The backend shape is not fixed, so the body is kept as raw JSON of any type.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(transparent)]
pub(crate) struct UserInfo {
    pub extra: serde_json::Value,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct SayHiRequest {
    pub name: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FeedItem {
    pub id: u32,
    pub title: String,
}
