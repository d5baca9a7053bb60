//! Property tests for the reference resolver.

use proptest::prelude::*;

use lunabuild::resolver::{resolve_reference, rewrite_module};
use lunabuild::scope::Scope;

fn dotted_reference() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[A-Za-z_][A-Za-z0-9_]{0,12}")
        .unwrap()
        .prop_filter("segment must not name a scope directory", |s| {
            !matches!(s.as_str(), "client" | "server" | "shared")
        });
    proptest::collection::vec(segment, 1..=5).prop_map(|segments| segments.join("."))
}

fn any_scope() -> impl Strategy<Value = Scope> {
    prop_oneof![
        Just(Scope::Client),
        Just(Scope::Server),
        Just(Scope::Shared),
        Just(Scope::None),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A resolved reference contains no `.` and no leading scope
    /// segment for any of the three recognized prefixes.
    #[test]
    fn property_resolved_reference_shape(
        scope in any_scope(),
        referenced_prefix in proptest::option::of(any_scope()),
        tail in dotted_reference()
    ) {
        let reference = match referenced_prefix.and_then(|s| s.dir()) {
            Some(dir) => format!("{dir}.{tail}"),
            None => tail,
        };
        let (resolved, _) = resolve_reference(scope, &reference);
        prop_assert!(!resolved.contains('.'));
        for prefix in ["client/", "server/", "shared/"] {
            prop_assert!(!resolved.starts_with(prefix));
        }
    }

    /// PROPERTY: Exactly one violation per exclusive-scope cross reference,
    /// and the violation never changes the rewritten path's shape.
    #[test]
    fn property_cross_scope_violation(
        tail in dotted_reference()
    ) {
        for (from, to) in [(Scope::Client, "server"), (Scope::Server, "client")] {
            let reference = format!("{to}.{tail}");
            let (resolved, violation) = resolve_reference(from, &reference);
            prop_assert!(violation.is_some());
            prop_assert_eq!(&resolved, &tail.replace('.', "/"));
        }
    }

    /// PROPERTY: Rewriting a module twice yields the same result as once.
    #[test]
    fn property_rewrite_idempotent(
        scope in any_scope(),
        references in proptest::collection::vec(dotted_reference(), 0..=4)
    ) {
        let module = references
            .iter()
            .enumerate()
            .map(|(i, r)| format!("local m{i} = require(\"{r}\")\n"))
            .collect::<String>()
            + "return ____exports\n";

        let (once, _) = rewrite_module(scope, &module);
        let (twice, violations) = rewrite_module(scope, &once);
        prop_assert_eq!(&once, &twice);
        prop_assert!(violations.is_empty());
    }

    /// PROPERTY: The rewriter never panics on arbitrary input.
    #[test]
    fn property_rewrite_never_panics(
        scope in any_scope(),
        text in "(?s).{0,256}"
    ) {
        let _ = rewrite_module(scope, &text);
    }
}
