use std::fmt;

use ring::constant_time::verify_slices_are_equal;

/// Shared secret a webhook caller must present in the request path.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new<T: Into<String>>(value: T) -> Self {
        Self(value.into())
    }

    /// Exact, byte-wise comparison. Only the length of `presented` can
    /// influence the running time.
    pub fn matches(&self, presented: &str) -> bool {
        verify_slices_are_equal(self.0.as_bytes(), presented.as_bytes()).is_ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}
