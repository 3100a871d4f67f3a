//! Shape of the push events accepted by the gateway.

use once_cell::sync::Lazy;

use super::{Collection, NotBlank, Pattern};

const BRANCH_REF_PREFIX: &str = "refs/heads/";

pub static PUSH_EVENT_SCHEMA: Lazy<Collection> = Lazy::new(push_event_schema);

/// Only the fields below are constrained; anything else is passed through.
pub fn push_event_schema() -> Collection {
    Collection::allowing_extra_fields()
        .field(
            "ref",
            Pattern::new(
                "This value should start with \"refs/heads/\".",
                is_branch_ref,
            ),
        )
        .field(
            "head",
            Pattern::new(
                "This value should start with a hexadecimal digit.",
                starts_with_hex_digit,
            ),
        )
        .field(
            "repository",
            Collection::allowing_extra_fields()
                .field("name", NotBlank)
                .field(
                    "url",
                    Pattern::new("This value should be an HTTP(S) URL.", is_http_url),
                )
                .field(
                    "owner",
                    Collection::allowing_extra_fields().field("name", NotBlank),
                ),
        )
}

fn is_branch_ref(value: &str) -> bool {
    value.starts_with(BRANCH_REF_PREFIX)
}

fn starts_with_hex_digit(value: &str) -> bool {
    value.chars().next().map_or(false, |c| c.is_ascii_hexdigit())
}

fn is_http_url(value: &str) -> bool {
    let rest = match value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
    {
        Some(rest) => rest,
        None => return false,
    };

    // A single trailing line feed is tolerated, any other line break is not.
    let rest = rest.strip_suffix('\n').unwrap_or(rest);
    !rest.is_empty() && !rest.contains('\n')
}
