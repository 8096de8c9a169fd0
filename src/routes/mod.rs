//! API Routes

pub mod dashboard;
pub mod experts;
pub mod health;
pub mod tickets;
