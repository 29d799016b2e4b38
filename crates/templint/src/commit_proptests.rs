//! Property-based tests for commit header parsing

use super::*;
use proptest::prelude::*;

fn commit_type() -> impl Strategy<Value = String> {
    prop::sample::select(COMMIT_TYPES.to_vec()).prop_map(|s| s.to_string())
}

fn scope() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-z][a-z0-9-]{0,11}")
}

fn description() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9 ]{0,40}[a-z0-9]"
}

proptest! {
    // Any well-formed header parses back into its parts
    #[test]
    fn prop_well_formed_headers_parse(
        kind in commit_type(),
        scope in scope(),
        breaking in any::<bool>(),
        description in description(),
    ) {
        let header = format!(
            "{}{}{}: {}",
            kind,
            scope.as_ref().map(|s| format!("({})", s)).unwrap_or_default(),
            if breaking { "!" } else { "" },
            description,
        );

        let commit = parse_commit_message(&header).unwrap();
        prop_assert_eq!(commit.kind, kind);
        prop_assert_eq!(commit.scope, scope);
        prop_assert_eq!(commit.breaking, breaking);
        prop_assert_eq!(commit.description, description);
    }

    // Leading and trailing whitespace never changes the verdict
    #[test]
    fn prop_whitespace_padding_is_ignored(
        message in "[ -~]{0,40}",
        before in "[ \n\t]{0,4}",
        after in "[ \n\t]{0,4}",
    ) {
        let padded = format!("{}{}{}", before, message, after);
        prop_assert_eq!(
            parse_commit_message(&message).is_ok(),
            parse_commit_message(&padded).is_ok()
        );
    }

    // A message whose first word is not a known type is rejected
    #[test]
    fn prop_unknown_types_rejected(word in "[A-Z][a-z]{0,8}", rest in "[a-z ]{1,20}") {
        let message = format!("{}: {}", word, rest);
        prop_assert!(parse_commit_message(&message).is_err());
    }
}
