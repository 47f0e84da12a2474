//! Domain types for Roster

mod user;

pub use user::{validate_email, validate_name, NewUser, User, UserId, NAME_MIN_CHARS};
