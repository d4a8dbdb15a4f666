//! Domain model of tenant virtual machines and the quotas they are admitted against.

pub mod command;
pub mod exception;
pub mod model;
pub mod repository;
pub mod service;

#[cfg(feature = "mock")]
pub mod mock;
