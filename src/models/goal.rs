use serde::{Deserialize, Serialize};

use super::waste::Subcategory;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Goal {
    pub id: u64,
    pub category: Subcategory,
    pub timeframe: Timeframe,
    pub target: f64,
    pub progress: f64,
    pub is_complete: bool,
    pub created_at: String,
    pub start_date: String,
    pub status: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GoalTemplate {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_name: String,
    pub target: f64,
    pub timeframe: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct CreateGoal {
    pub user: u64,
    pub category_id: u64,
    pub timeframe: Timeframe,
    pub target: f64,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Body for instantiating a goal from a template; the template supplies
/// category, timeframe and target.
#[derive(Serialize, Debug, Clone)]
pub struct CreateGoalFromTemplate {
    pub user: u64,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct UpdateGoal {
    pub user: u64,
    pub category_id: u64,
    pub timeframe: Timeframe,
    pub target: f64,
    pub start_date: String,
}
