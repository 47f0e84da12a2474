/// API route modules
pub mod extract;
pub mod users;
