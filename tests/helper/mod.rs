//! Test utilities

#![allow(dead_code)]

pub mod repo;

pub use repo::TestRepo;
