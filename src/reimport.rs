//! Deferred reimport injector
//!
//! The host API surface behind a reserved namespace prefix initializes only
//! after host boot, yet emitted modules may capture values from it in
//! top-level local declarations:
//!
//! ```lua
//! local maxSpeed = GameAPI.Config.MaxSpeed
//! ```
//!
//! Such a local holds a stale value at load time. The injector records, for
//! every matching declaration, a bare reassignment (`maxSpeed =
//! GameAPI.Config.MaxSpeed`) and splices the configured template, with the
//! reassignments substituted for its `{{body}}` marker, immediately before the
//! module's trailing return. Executed in the same lexical scope once the host
//! signals readiness, the reassignment overwrites the already-declared local,
//! so closures formed over it observe the corrected value. The original
//! declarations stay where they are; declare-once / reassign-later is the
//! point, not an oversight.

use std::borrow::Cow;

use crate::banner::REIMPORT_BODY_MARKER;

/// A local declaration whose initializer reads the lazy namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredBinding {
    /// Left-hand variable name
    pub name: String,
    /// Right-hand initializer expression, verbatim
    pub initializer: String,
}

impl DeferredBinding {
    /// The bare reassignment statement: same name, same initializer, no
    /// declaration qualifier
    pub fn reassignment(&self) -> String {
        format!("{} = {}", self.name, self.initializer)
    }
}

/// Collect qualifying local declarations, in order of first appearance
pub fn collect_bindings(text: &str, namespace: &str) -> Vec<DeferredBinding> {
    text.lines()
        .filter_map(|line| {
            let rest = line.trim_start().strip_prefix("local ")?;
            let (name, initializer) = rest.split_once('=')?;
            let name = name.trim();
            let initializer = initializer.trim();
            if !is_identifier(name) || !references_namespace(initializer, namespace) {
                return None;
            }
            Some(DeferredBinding {
                name: name.to_string(),
                initializer: initializer.to_string(),
            })
        })
        .collect()
}

/// Repair one emitted module
///
/// Returns the input unchanged (borrowed, no rewrite cost) when the module has
/// no qualifying bindings or no template is configured. Otherwise splices the
/// expanded template before the trailing return statement, which must remain
/// the module's final statement: the host loader treats a module's final
/// expression as its export value.
pub fn inject<'a>(text: &'a str, namespace: &str, template: Option<&str>) -> Cow<'a, str> {
    let bindings = collect_bindings(text, namespace);
    if bindings.is_empty() {
        return Cow::Borrowed(text);
    }
    let Some(template) = template else {
        // Template absent: detection ran but nothing is spliced.
        return Cow::Borrowed(text);
    };

    let body = bindings
        .iter()
        .map(DeferredBinding::reassignment)
        .collect::<Vec<_>>()
        .join("\n");
    let block = template.replace(REIMPORT_BODY_MARKER, &body);

    // The trailing export/return statement is the last non-empty line.
    let trimmed = text.trim_end();
    let export_start = trimmed.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let (head, tail) = text.split_at(export_start);

    let mut out = String::with_capacity(text.len() + block.len() + 1);
    out.push_str(head);
    out.push_str(&block);
    if !block.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(tail);
    Cow::Owned(out)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// True if the expression mentions `<namespace>.` at a token boundary
fn references_namespace(expression: &str, namespace: &str) -> bool {
    let marker = format!("{namespace}.");
    let mut search = expression;
    let mut offset = 0;
    while let Some(idx) = search.find(&marker) {
        let absolute = offset + idx;
        let boundary = absolute == 0 || {
            let prev = expression.as_bytes()[absolute - 1];
            !(prev.is_ascii_alphanumeric() || prev == b'_' || prev == b'.')
        };
        if boundary {
            return true;
        }
        search = &search[idx + marker.len()..];
        offset = absolute + marker.len();
    }
    false
}
