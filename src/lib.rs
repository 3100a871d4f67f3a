pub mod auth;
pub mod check;
pub mod cmdargs;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod logging;
pub mod queue;
pub mod server_info;
pub mod service;
pub mod validation;

#[cfg(test)]
mod test_support;
