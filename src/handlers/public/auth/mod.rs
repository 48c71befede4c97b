// handlers/public/auth/mod.rs - Public authentication handlers

pub mod login;    // POST /api/auth/login - authenticate and get JWT
pub mod register; // POST /api/auth/register - create new account
pub mod session;  // GET /api/session - optional session probe

pub use login::login;
pub use register::register;
pub use session::session;
