pub mod remote; // health, whoami against a running server
pub mod token;  // offline token and role helpers
