/// Opaque scope tokens presented by callers
///
/// The engine interprets no structure inside a scope: a scope either equals
/// the admin scope, equals some team's scope, or means nothing.
///
/// # Examples
///
/// ```
/// use catalog_authz::scope::{Scope, Scopes};
///
/// let presented: Scopes = ["scope_dadi", "unrelated"].into_iter().collect();
/// assert!(presented.contains(&Scope::from("scope_dadi")));
/// ```

mod types;

#[cfg(test)]
mod tests;

pub use types::{Scope, ScopeError, ScopeResult, Scopes};
