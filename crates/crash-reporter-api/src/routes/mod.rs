//! Route modules.

pub mod crashes;
pub mod health;
