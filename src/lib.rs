//! Core of the got version-control tool: creating, locating and opening
//! repositories and the files inside their `.got` metadata directory.

#![deny(warnings)]

pub mod repo;
pub use repo::{Config, Error, Repository, Result};
