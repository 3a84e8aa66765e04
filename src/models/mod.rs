//! Data models for the lending server

pub mod book;
pub mod borrowing;
pub mod member;
