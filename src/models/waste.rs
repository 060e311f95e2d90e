use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Subcategory {
    pub id: u64,
    pub name: String,
    pub category: u64,
    #[serde(default)]
    pub description: String,
    pub score_per_unit: String,
    pub unit: String,
    pub is_active: bool,
}

/// A single disposal entry recorded by the user.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct WasteLog {
    pub id: u64,
    pub sub_category_name: String,
    pub quantity: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub date_logged: String,
    pub disposal_date: String,
    #[serde(default)]
    pub disposal_location: Option<String>,
    #[serde(default)]
    pub disposal_photo: Option<String>,
    pub score: f64,
    pub sub_category: u64,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateWasteLog {
    pub sub_category: u64,
    pub quantity: f64,
    pub disposal_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposal_location: Option<String>,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct UpdateWasteLog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposal_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposal_date: Option<String>,
}

/// Request for a waste category that does not exist yet.
#[derive(Serialize, Debug, Clone)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub unit: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ScoreResponse {
    pub total_score: f64,
}
