//! Resource paths, relative to the configured base URL.

pub mod waste {
    pub const CATEGORY_REQUEST: &str = "/api/v1/waste/categories/request/";
    pub const SUBCATEGORIES: &str = "/api/v1/waste/subcategories/";
    pub const LOGS: &str = "/api/v1/waste/logs/";
    pub const MY_SCORE: &str = "/api/v1/waste/scores/me/";

    pub fn log(id: u64) -> String {
        format!("/api/v1/waste/logs/{}/", id)
    }
}

pub mod goals {
    pub const LIST: &str = "/api/v1/goals/goals/";
    pub const TEMPLATES: &str = "/api/v1/goals/templates/";

    pub fn goal(id: u64) -> String {
        format!("/api/v1/goals/goals/{}/", id)
    }

    pub fn from_template(template_id: u64) -> String {
        format!("/api/v1/goals/goals/api-template/{}/", template_id)
    }
}

pub mod challenges {
    pub const LIST: &str = "/api/v1/challenges/api/v1/challenges/";

    pub fn challenge(id: u64) -> String {
        format!("{}{}/", LIST, id)
    }

    pub fn join(id: u64) -> String {
        format!("{}{}/join/", LIST, id)
    }

    pub fn leave(id: u64) -> String {
        format!("{}{}/leave/", LIST, id)
    }
}

pub mod events {
    pub const LIST: &str = "/api/v1/events/events/";

    pub fn event(id: u64) -> String {
        format!("{}{}/", LIST, id)
    }

    pub fn like(id: u64) -> String {
        format!("{}{}/like/", LIST, id)
    }

    pub fn participate(id: u64) -> String {
        format!("{}{}/participate/", LIST, id)
    }
}

pub mod user {
    pub const PROFILE: &str = "/api/user/me/";
    pub const USERS: &str = "/api/user/users/";

    pub fn set_active_status(id: u64) -> String {
        format!("{}{}/set_active_status/", USERS, id)
    }
}

pub mod admin {
    pub const CATEGORY_REQUESTS: &str = "/api/v1/waste/admin/categories/requests/";

    pub fn approve(id: u64) -> String {
        format!("{}{}/approve/", CATEGORY_REQUESTS, id)
    }

    pub fn reject(id: u64) -> String {
        format!("{}{}/reject/", CATEGORY_REQUESTS, id)
    }
}
