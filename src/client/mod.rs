pub mod client;
pub mod coordinator;
pub mod error;
pub mod pagination;
pub mod request;
pub mod response;
pub mod session;

// Re-export the primary client items so code outside can do
// "use crate::client::{AuthClient, ClientError};"
pub use client::AuthClient;
pub use coordinator::RefreshCoordinator;
pub use error::{ClientError, RefreshFailure};
pub use request::{FormPart, RequestOptions};
pub use response::{error_message, expect_success, parse_json};
