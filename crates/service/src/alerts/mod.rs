//! Alert module: three-layer architecture (domain, repository, service).
//!
//! Handlers in the server crate call `AlertService`; persistence goes through
//! `AlertRepository` and confirmations through `notify::Notifier`.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AlertService;
