//! Cache Key Generation
//!
//! Keys have the form `<namespace>:<operation>:<canonical params json>`.

use crate::params::Params;

/// Separator between key segments; namespace invalidation matches `<namespace>:`.
pub const KEY_SEPARATOR: char = ':';

/// Builds the cache key for an operation call.
///
/// Parameter names are sorted before serializing, so the key does not depend
/// on the order the call site built its parameters in.
pub fn generate_key(namespace: &str, operation: &str, params: &Params) -> String {
    format!(
        "{ns}{sep}{op}{sep}{params}",
        ns = namespace,
        op = operation,
        params = params.to_canonical_json(),
        sep = KEY_SEPARATOR
    )
}

/// Prefix shared by every key generated under `namespace`.
pub fn namespace_prefix(namespace: &str) -> String {
    format!("{}{}", namespace, KEY_SEPARATOR)
}
