use serde::Serialize;

pub const APP_NAME: &str = "hookgate";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PUSH_HOOK_ROUTE: &str = "/hook/push/{token}";

/// Body of `GET /`, used by load balancers and humans alike.
#[derive(Serialize)]
pub struct ServerInfo {
    message: String,
    version: &'static str,
    hooks: Vec<&'static str>,
}

impl ServerInfo {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            message: format!("{}, ready for action!", APP_NAME),
            version: APP_VERSION,
            hooks: vec![PUSH_HOOK_ROUTE],
        }
    }
}
