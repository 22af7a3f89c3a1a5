pub mod admin;
pub mod response;

pub use admin::{require_admin_code, ADMIN_CODE_HEADER};
pub use response::{ApiResponse, ApiResult};
