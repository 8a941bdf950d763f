//! Procedure name resolution.
//!
//! Kanboard procedures are `camelCase` (`createProject`, `getAllTasks`). Callers
//! may use the Rust-friendly `snake_case` form instead, optionally suffixed with
//! `_async`, and it resolves to the same procedure.

pub const ASYNC_FUNCNAME_MARKER: &str = "_async";

#[must_use]
pub fn is_async_method_name(name: &str) -> bool {
    name.ends_with(ASYNC_FUNCNAME_MARKER)
}

#[must_use]
pub fn method_from_async_name(name: &str) -> &str {
    name.strip_suffix(ASYNC_FUNCNAME_MARKER).unwrap_or(name)
}

/// Converts `snake_case` to `camelCase`.
///
/// The first component is kept untouched and every later one is title-cased,
/// so names that are already `camelCase` pass through unchanged.
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut components = name.split('_');
    let mut out = components.next().unwrap_or("").to_string();

    for component in components {
        let mut chars = component.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }

    out
}

#[must_use]
pub fn resolve_procedure(name: &str) -> String {
    to_camel_case(method_from_async_name(name))
}
