//! Request middleware

pub mod seed;
