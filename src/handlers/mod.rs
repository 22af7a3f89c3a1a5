// Request handlers, one per operation.
//
// projects  POST /api/projects                 submit an intake form
// admin     POST /api/admin/verify             check code, list projects
//           DELETE /api/admin/projects/:id     delete one (admin code header)
//           DELETE /api/admin/projects         delete all (admin code header)
// status    GET /, /health, /api/test          service information
// dispatch  /api?endpoint=projects|admin|test  query-string routing variant
// fallback  unknown routes and methods

pub mod admin;
pub mod dispatch;
pub mod fallback;
pub mod projects;
pub mod status;

/// Attached to responses served from the in-memory store
pub const DEMO_MODE_MESSAGE: &str = "Development mode - Supabase not configured";
