// handlers/mod.rs - Two-tier handler layout
//
// Public (no session, or an optional one) → Protected (valid session).
// The tier is decided by the extractor a handler takes: `MaybeUser` never
// rejects, `AuthUser` rejects with 401 before the handler body runs.
pub mod public;    // /, /health, /api/auth/login, /api/auth/register, /api/session, GET /api/courses
pub mod protected; // everything else under /api
