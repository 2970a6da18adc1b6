use crate::constants::TIME_UNIFORM_NAMES;

/// Returns the first location `lookup` resolves, trying `names` in order.
pub fn resolve_uniform<T>(names: &[&str], lookup: impl FnMut(&str) -> Option<T>) -> Option<T> {
    let mut lookup = lookup;
    names.iter().find_map(|name| lookup(name))
}

/// Resolves the time-like uniform under either accepted name.
pub fn resolve_time_uniform<T>(lookup: impl FnMut(&str) -> Option<T>) -> Option<T> {
    resolve_uniform(&TIME_UNIFORM_NAMES, lookup)
}
