use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Event {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location: String,
    pub date: String,
    #[serde(default)]
    pub image: Option<String>,
    pub creator: u64,
    pub creator_username: String,
    #[serde(default)]
    pub participants_count: u64,
    #[serde(default)]
    pub likes_count: u64,
    #[serde(default)]
    pub i_am_participating: bool,
    #[serde(default)]
    pub i_liked: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields of a new event. `image` is a local file uploaded with it.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: String,
    pub image: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LikeResponse {
    pub likes_count: u64,
    pub i_liked: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ParticipateResponse {
    pub participants_count: u64,
    pub i_am_participating: bool,
}
