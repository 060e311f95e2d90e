use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Individual,
    Team,
    Open,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Challenge {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub goal_quantity: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub target_category: Option<u64>,
    #[serde(default)]
    pub target_subcategory: Option<u64>,
    pub start_date: String,
    pub end_date: String,
    pub entry_type: EntryType,
    #[serde(default)]
    pub template: Option<u64>,
    pub creator: u64,
    pub created_at: String,
    #[serde(default)]
    pub participants_count: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ChallengeParticipation {
    pub id: u64,
    pub user: String,
    pub challenge: String,
    #[serde(default)]
    pub team: Option<String>,
    pub progress: f64,
    pub status: String,
    pub joined_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub exited_at: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Upcoming,
    Active,
    Past,
}

/// Classifies a challenge against `today` by calendar day. Both the start and
/// the end day count as active.
///
/// Dates may be plain `YYYY-MM-DD` or full timestamps; only the date part is used.
/// Returns `None` when either date cannot be parsed.
pub fn challenge_status(start_date: &str, end_date: &str, today: NaiveDate) -> Option<ChallengeStatus> {
    let start = parse_day(start_date)?;
    let end = parse_day(end_date)?;

    if today < start {
        Some(ChallengeStatus::Upcoming)
    } else if today > end {
        Some(ChallengeStatus::Past)
    } else {
        Some(ChallengeStatus::Active)
    }
}

impl Challenge {
    pub fn status_on(&self, today: NaiveDate) -> Option<ChallengeStatus> {
        challenge_status(&self.start_date, &self.end_date, today)
    }
}

fn parse_day(value: &str) -> Option<NaiveDate> {
    let day = value.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
