//! Circuit definitions and their data mappers.

pub mod age;
