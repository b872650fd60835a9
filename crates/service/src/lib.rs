//! Service layer for the disaster-alert backend.
//! - `alerts`: subscription, emergency, resource and broadcast workflows.
//! - `notify`: outbound SMS dispatch behind a gateway trait.
//! - Storage is reached only through `alerts::repository::AlertRepository`.

pub mod errors;
pub mod alerts;
pub mod notify;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
