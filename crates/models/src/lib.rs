pub mod errors;
pub mod db;
pub mod subscriber;
pub mod emergency_request;
pub mod resource_request;

#[cfg(test)]
mod tests;
