//! Reference resolver
//!
//! The transpiler emits dotted module references (`require("client.net.rpc")`)
//! but the host loader resolves only slash-separated paths via `include(...)`.
//! The resolver rewrites every import call in an emitted module:
//!
//! 1. `.` becomes `/`.
//! 2. A leading `client/`, `server/` or `shared/` segment is stripped: scoped
//!    output directories are flattened relative to the loader's own root, so
//!    scope is implicit from the consuming module's location.
//! 3. A client module referencing server code (or vice versa) yields a
//!    [`ScopeViolation`] warning. The path is still rewritten and written out;
//!    the failure is deliberately deferred to host load time.
//!
//! Rewriting replaces the `require(` call form with `include(`, so running the
//! resolver over its own output is a no-op.

use std::fmt;

use crate::scope::Scope;

/// The emitted import-call syntax this scanner looks for
const IMPORT_CALL: &str = "require(\"";

/// Cross-reference between the two mutually exclusive scopes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeViolation {
    /// Scope of the referencing module
    pub from: Scope,
    /// Scope named by the reference
    pub to: Scope,
    /// The raw dotted reference as emitted
    pub reference: String,
}

impl fmt::Display for ScopeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} module references {} code via \"{}\"; the host loader will not resolve this",
            self.from, self.to, self.reference
        )
    }
}

/// Rewrite one dotted reference into a host-loadable path
///
/// Returns the slash path (scope segment stripped) and at most one violation.
pub fn resolve_reference(scope: Scope, raw: &str) -> (String, Option<ScopeViolation>) {
    let slashed = raw.replace('.', "/");

    for referenced in [Scope::Shared, Scope::Client, Scope::Server] {
        let dir = referenced.dir().unwrap_or_default();
        let Some(rest) = slashed
            .strip_prefix(dir)
            .and_then(|r| r.strip_prefix('/'))
        else {
            continue;
        };

        let violation = (scope.is_exclusive() && referenced.is_exclusive() && scope != referenced)
            .then(|| ScopeViolation {
                from: scope,
                to: referenced,
                reference: raw.to_string(),
            });
        return (rest.to_string(), violation);
    }

    (slashed, None)
}

/// Rewrite every import call in an emitted module body
///
/// Scans left to right for `require("…")`. The reference may contain any
/// character other than the closing `"`; nothing outside the literal span is
/// consulted. Occurrences embedded in a longer identifier are left alone.
pub fn rewrite_module(scope: Scope, text: &str) -> (String, Vec<ScopeViolation>) {
    if !text.contains(IMPORT_CALL) {
        return (text.to_string(), Vec::new());
    }

    let mut out = String::with_capacity(text.len());
    let mut violations = Vec::new();
    let mut rest = text;

    while let Some(idx) = rest.find(IMPORT_CALL) {
        if !at_token_boundary(rest, idx) {
            let cut = idx + IMPORT_CALL.len();
            out.push_str(&rest[..cut]);
            rest = &rest[cut..];
            continue;
        }

        let after = &rest[idx + IMPORT_CALL.len()..];
        let Some(end) = after.find('"') else {
            // Unterminated literal; leave the remainder untouched.
            break;
        };

        let raw = &after[..end];
        let (resolved, violation) = resolve_reference(scope, raw);
        violations.extend(violation);

        out.push_str(&rest[..idx]);
        out.push_str("include(\"");
        out.push_str(&resolved);
        out.push_str(".lua\"");
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    (out, violations)
}

/// True if the match at `idx` is not the tail of a longer identifier
fn at_token_boundary(text: &str, idx: usize) -> bool {
    if idx == 0 {
        return true;
    }
    let prev = text.as_bytes()[idx - 1];
    !(prev.is_ascii_alphanumeric() || prev == b'_' || prev == b'.' || prev == b':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_replaces_dots() {
        let (path, violation) = resolve_reference(Scope::Server, "net.rpc.codec");
        assert_eq!(path, "net/rpc/codec");
        assert!(violation.is_none());
    }

    #[test]
    fn test_resolve_strips_shared_prefix() {
        let (path, violation) = resolve_reference(Scope::Client, "shared.util.math");
        assert_eq!(path, "util/math");
        assert!(violation.is_none());
    }

    #[test]
    fn test_resolve_strips_own_scope_prefix() {
        let (path, violation) = resolve_reference(Scope::Client, "client.hud.frame");
        assert_eq!(path, "hud/frame");
        assert!(violation.is_none());
    }

    #[test]
    fn test_resolve_cross_scope_violation() {
        let (path, violation) = resolve_reference(Scope::Client, "server.secrets");
        assert_eq!(path, "secrets");
        let violation = violation.unwrap();
        assert_eq!(violation.from, Scope::Client);
        assert_eq!(violation.to, Scope::Server);
        assert_eq!(violation.reference, "server.secrets");
    }

    #[test]
    fn test_resolve_violation_both_directions() {
        assert!(resolve_reference(Scope::Server, "client.hud").1.is_some());
        assert!(resolve_reference(Scope::Client, "server.db").1.is_some());
        assert!(resolve_reference(Scope::Shared, "client.hud").1.is_none());
        assert!(resolve_reference(Scope::None, "server.db").1.is_none());
    }

    #[test]
    fn test_resolve_scope_name_must_be_full_segment() {
        let (path, _) = resolve_reference(Scope::Server, "clientele.data");
        assert_eq!(path, "clientele/data");
    }

    #[test]
    fn test_rewrite_single_import() {
        let (out, violations) =
            rewrite_module(Scope::Server, "local rpc = require(\"shared.net.rpc\")\n");
        assert_eq!(out, "local rpc = include(\"net/rpc.lua\")\n");
        assert!(violations.is_empty());
    }

    #[test]
    fn test_rewrite_multiple_imports_one_line() {
        let (out, _) = rewrite_module(
            Scope::Shared,
            "local a = require(\"x.y\") local b = require(\"p.q\")",
        );
        assert_eq!(out, "local a = include(\"x/y.lua\") local b = include(\"p/q.lua\")");
    }

    #[test]
    fn test_rewrite_collects_violations() {
        let module = "local a = require(\"server.db\")\nlocal b = require(\"server.auth\")\n";
        let (_, violations) = rewrite_module(Scope::Client, module);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].reference, "server.db");
        assert_eq!(violations[1].reference, "server.auth");
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let module = "local a = require(\"client.hud.frame\")\nreturn a\n";
        let (once, _) = rewrite_module(Scope::Client, module);
        let (twice, violations) = rewrite_module(Scope::Client, &once);
        assert_eq!(once, twice);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_rewrite_ignores_longer_identifiers() {
        let module = "myrequire(\"a.b\") obj.require(\"c.d\")";
        let (out, _) = rewrite_module(Scope::Shared, module);
        assert_eq!(out, module);
    }

    #[test]
    fn test_rewrite_reference_with_odd_characters() {
        let (out, _) = rewrite_module(Scope::None, "require(\"weird )(-- chars\")");
        assert_eq!(out, "include(\"weird )(-- chars.lua\")");
    }

    #[test]
    fn test_rewrite_unterminated_literal_left_alone() {
        let module = "local a = require(\"broken";
        let (out, violations) = rewrite_module(Scope::Shared, module);
        assert_eq!(out, module);
        assert!(violations.is_empty());
    }

    #[test]
    fn test_rewrite_no_imports_unchanged() {
        let module = "local x = 1\nreturn x\n";
        let (out, _) = rewrite_module(Scope::Server, module);
        assert_eq!(out, module);
    }
}
