use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_MODERATOR: &str = "MODERATOR";

/// A user account as seen through the admin user endpoints.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ManagedUser {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub notifications_enabled: bool,
    pub date_joined: String,
    #[serde(default)]
    pub last_login: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// A user's request for a new waste category, reviewed by admins.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CustomCategoryRequest {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub suggested_category: Option<u64>,
    pub unit: String,
    pub status: RequestStatus,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

impl CustomCategoryRequest {
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

/// `{"detail": ...}` bodies returned by action endpoints.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DetailResponse {
    pub detail: String,
}
