//! Parse compiled CSS test output into a module tree.
//!
//! The companion Sass test library reports results as specially-tagged CSS
//! comments in the compiled output. [`parse`] walks the compiled CSS as an
//! ordered node stream and reconstructs the Module → Test → Assertion tree
//! those comments describe. Block-style assertions (`ASSERT` … `END_ASSERT`)
//! capture the raw nodes between their delimiters and compare them after
//! re-serialization.

pub mod error;
pub mod model;

mod context;
mod machine;
mod sentinel;

pub use error::{ParseError, DEFAULT_CONTEXT_LINES};
pub use model::{Assertion, Module, Test};

use crate::css;
use context::Context;
use error::SourceContext;
use machine::{transition, State};

/// Parse compiled CSS into an ordered list of test modules.
///
/// `context_lines` sets how many source lines appear in the context window
/// under a structural parse error; `None` means the default of
/// [`DEFAULT_CONTEXT_LINES`].
///
/// Each call owns a fresh parsing context: parsing the same text twice
/// yields equal trees, and no state leaks between calls. On error no
/// partial tree is returned.
pub fn parse(raw_css: &str, context_lines: Option<usize>) -> Result<Vec<Module>, ParseError> {
    let nodes = css::parse_nodes(raw_css)?;
    log::debug!("parsing test results from {} css nodes", nodes.len());

    let src = SourceContext::new(raw_css, context_lines);
    let mut ctx = Context::default();
    let mut state = State::AwaitModule;
    for node in &nodes {
        state = transition(state, node, &mut ctx, &src)?;
    }
    ctx.finish_module();

    log::debug!("parsed {} top-level module(s)", ctx.modules.len());
    Ok(ctx.modules)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn passing(description: &str) -> Assertion {
        Assertion {
            description: description.into(),
            passed: true,
            ..Assertion::default()
        }
    }

    // ── Inline assertions ────────────────────────────────────────────

    #[test]
    fn parses_a_passing_test() {
        let css = "/* # Module: Utilities */\n\
                   /* ------------------- */\n\
                   /* Test: Map Add [function] */\n\
                   /*   ✔ Returns the sum of two numeric maps */";
        let expected = vec![Module {
            name: "Utilities".into(),
            tests: vec![Test {
                name: "Map Add [function]".into(),
                assertions: vec![passing("Returns the sum of two numeric maps")],
            }],
            modules: vec![],
        }];
        assert_eq!(parse(css, None).unwrap(), expected);
    }

    #[test]
    fn parse_is_idempotent() {
        let css = "/* # Module: Utilities */\n\
                   /* Test: T */\n\
                   /*   ✔ fine */";
        assert_eq!(parse(css, None).unwrap(), parse(css, None).unwrap());
    }

    #[test]
    fn nested_module_names_build_a_tree() {
        let css = "/* # Module: Utilities :: nested */\n\
                   /* Test: T */\n\
                   /*   ✔ fine */";
        let modules = parse(css, None).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "Utilities");
        assert!(modules[0].tests.is_empty());
        assert_eq!(modules[0].modules.len(), 1);
        assert_eq!(modules[0].modules[0].name, "nested");
        assert_eq!(modules[0].modules[0].tests.len(), 1);
    }

    #[test]
    fn failing_assertion_with_details() {
        let css = "/* # Module: Assert */\n\
                   /* ---------------- */\n\
                   /* Test: Simple assertions */\n\
                   /*   ✖ FAILED: [assert-true] True should assert true. */\n\
                   /*     - Output: [bool] false */\n\
                   /*     - Expected: [bool] true */\n\
                   /*     - Details: Broken tautology is broken. */";
        let modules = parse(css, None).unwrap();
        let assertion = &modules[0].tests[0].assertions[0];
        assert_eq!(
            assertion,
            &Assertion {
                description: "True should assert true.".into(),
                passed: false,
                assertion_type: Some("assert-true".into()),
                output: Some("[bool] false".into()),
                expected: Some("[bool] true".into()),
                details: Some("Broken tautology is broken.".into()),
                ..Assertion::default()
            }
        );
    }

    #[test]
    fn failing_assertion_without_details_then_pass() {
        let css = "/* # Module: Assert */\n\
                   /* Test: Simple assertions */\n\
                   /*   ✖ FAILED: [assert-true] True should assert true. */\n\
                   /*   ✔ False should assert false */";
        let modules = parse(css, None).unwrap();
        let assertions = &modules[0].tests[0].assertions;
        assert_eq!(assertions.len(), 2);
        assert!(!assertions[0].passed);
        assert_eq!(assertions[0].assertion_type.as_deref(), Some("assert-true"));
        assert!(assertions[1].passed);
    }

    // ── Block assertions ─────────────────────────────────────────────

    #[test]
    fn equal_blocks_pass() {
        let css = "/* # Module: Assert */\n\
                   /* Test: CSS output assertions */\n\
                   /*   ASSERT: Input and output selector patterns match   */\n\
                   /* */\n\
                   /*   OUTPUT   */\n\
                   .test-output {\n  -property: value; }\n\n\
                   /*   END_OUTPUT   */\n\
                   /* */\n\
                   /*   EXPECTED   */\n\
                   .test-output {\n  -property: value; }\n\n\
                   /*   END_EXPECTED   */\n\
                   /* */\n\
                   /*   END_ASSERT   */";
        let modules = parse(css, None).unwrap();
        let assertion = &modules[0].tests[0].assertions[0];
        assert_eq!(
            assertion,
            &Assertion {
                description: "Input and output selector patterns match".into(),
                passed: true,
                assertion_type: Some("equal".into()),
                output: Some(".test-output {\n  -property: value;\n}".into()),
                expected: Some(".test-output {\n  -property: value;\n}".into()),
                ..Assertion::default()
            }
        );
    }

    #[test]
    fn unequal_blocks_fail() {
        let css = "/* # Module: Assert */\n\
                   /* Test: T */\n\
                   /*   ASSERT: mismatch   */\n\
                   /*   OUTPUT   */\n\
                   .test-output {\n  -property: value1; }\n\
                   /*   END_OUTPUT   */\n\
                   /*   EXPECTED   */\n\
                   .test-output {\n  -property: value2; }\n\
                   /*   END_EXPECTED   */\n\
                   /*   END_ASSERT   */";
        let assertion = &parse(css, None).unwrap()[0].tests[0].assertions[0];
        assert!(!assertion.passed);
        assert_eq!(
            assertion.output.as_deref(),
            Some(".test-output {\n  -property: value1;\n}")
        );
        assert_eq!(
            assertion.expected.as_deref(),
            Some(".test-output {\n  -property: value2;\n}")
        );
    }

    #[test]
    fn declaration_order_is_literal() {
        // Value-equal but differently ordered blocks must not compare equal.
        let css = "/* # Module: Assert */\n\
                   /* Test: T */\n\
                   /*   ASSERT: order   */\n\
                   /*   OUTPUT   */\n\
                   .x {\n  -b: 2;\n  -a: 1;\n}\n\
                   /*   END_OUTPUT   */\n\
                   /*   EXPECTED   */\n\
                   .x {\n  -a: 1;\n  -b: 2;\n}\n\
                   /*   END_EXPECTED   */\n\
                   /*   END_ASSERT   */";
        let assertion = &parse(css, None).unwrap()[0].tests[0].assertions[0];
        assert!(!assertion.passed);
    }

    #[test]
    fn loud_comments_are_captured_into_blocks() {
        let css = "/* Some random loud comment */\n\
                   /* # Module: Assert */\n\
                   /* Test: T */\n\
                   /*   ASSERT: comments   */\n\
                   /*   OUTPUT   */\n\
                   /* Some loud comment */\n\
                   .test-output {\n  -property: value; }\n\
                   /*   END_OUTPUT   */\n\
                   /*   EXPECTED   */\n\
                   /* Some loud comment */\n\
                   .test-output {\n  -property: value; }\n\
                   /*   END_EXPECTED   */\n\
                   /*   END_ASSERT   */";
        let assertion = &parse(css, None).unwrap()[0].tests[0].assertions[0];
        assert!(assertion.passed);
        assert_eq!(
            assertion.output.as_deref(),
            Some("/* Some loud comment */\n.test-output {\n  -property: value;\n}")
        );
    }

    #[test]
    fn comment_only_blocks_compare_equal() {
        let css = "/* # Module: True Message */\n\
                   /* ---------------------- */\n\
                   /* Test: Simple messages */\n\
                   /*   ASSERT: Render as CSS comments   */\n\
                   /*   OUTPUT   */\n\
                   /* This is a simple message */\n\
                   /*   END_OUTPUT   */\n\
                   /*   EXPECTED   */\n\
                   /* This is a simple message */\n\
                   /*   END_EXPECTED   */\n\
                   /*   END_ASSERT   */\n\
                   /*  */";
        let assertion = &parse(css, None).unwrap()[0].tests[0].assertions[0];
        assert!(assertion.passed);
        assert_eq!(
            assertion.output.as_deref(),
            Some("/* This is a simple message */")
        );
    }

    #[test]
    fn contained_blocks_use_the_containment_predicate() {
        let css = "/* # Module: Contains */\n\
                   /* Test: CSS output contains */\n\
                   /*   ASSERT: subset   */\n\
                   /* */\n\
                   /*   OUTPUT   */\n\
                   .test-output {\n  height: 10px;\n  width: 20px; }\n\
                   /*   END_OUTPUT   */\n\
                   /* */\n\
                   /*   CONTAINED   */\n\
                   .test-output {\n  height: 10px; }\n\
                   /*   END_CONTAINED   */\n\
                   /* */\n\
                   /*   END_ASSERT   */";
        let assertion = &parse(css, None).unwrap()[0].tests[0].assertions[0];
        assert!(assertion.passed);
        assert_eq!(assertion.assertion_type.as_deref(), Some("contains"));
        assert_eq!(
            assertion.output.as_deref(),
            Some(".test-output {\n  height: 10px;\n  width: 20px;\n}")
        );
        assert_eq!(
            assertion.expected.as_deref(),
            Some(".test-output {\n  height: 10px;\n}")
        );
    }

    #[test]
    fn contained_fails_on_wrong_selector() {
        let css = "/* # Module: Contains */\n\
                   /* Test: T */\n\
                   /*   ASSERT: subset   */\n\
                   /*   OUTPUT   */\n\
                   .test-output {\n  height: 10px; }\n\
                   /*   END_OUTPUT   */\n\
                   /*   CONTAINED   */\n\
                   .other-class {\n  height: 10px; }\n\
                   /*   END_CONTAINED   */\n\
                   /*   END_ASSERT   */";
        let assertion = &parse(css, None).unwrap()[0].tests[0].assertions[0];
        assert!(!assertion.passed);
    }

    #[test]
    fn contains_string_checks_substring() {
        let css = "/* # Module: Contains-string */\n\
                   /* Test: T */\n\
                   /*   ASSERT: substring   */\n\
                   /*   OUTPUT   */\n\
                   .test-output {\n  height: 10px;\n  width: 20px; }\n\
                   /*   END_OUTPUT   */\n\
                   /*   CONTAINS_STRING   */\n\
                   /* height */\n\
                   /*   END_CONTAINS_STRING   */\n\
                   /*   END_ASSERT   */";
        let assertion = &parse(css, None).unwrap()[0].tests[0].assertions[0];
        assert!(assertion.passed);
        assert_eq!(assertion.assertion_type.as_deref(), Some("contains-string"));
        assert_eq!(assertion.expected.as_deref(), Some("height"));
    }

    #[test]
    fn contains_string_fails_on_missing_substring() {
        let css = "/* # Module: Contains-string */\n\
                   /* Test: T */\n\
                   /*   ASSERT: substring   */\n\
                   /*   OUTPUT   */\n\
                   .test-output {\n  height: 10px; }\n\
                   /*   END_OUTPUT   */\n\
                   /*   CONTAINS_STRING   */\n\
                   /* background-color */\n\
                   /*   END_CONTAINS_STRING   */\n\
                   /*   END_ASSERT   */";
        let assertion = &parse(css, None).unwrap()[0].tests[0].assertions[0];
        assert!(!assertion.passed);
        assert_eq!(assertion.expected.as_deref(), Some("background-color"));
    }

    // ── Summaries and noise ──────────────────────────────────────────

    #[test]
    fn summary_blocks_are_skipped() {
        let css = "/* # SUMMARY ---------- */\n\
                   /* 17 Tests: */\n\
                   /*  - 14 Passed */\n\
                   /*  - 0 Failed */\n\
                   /*  - 3 Output to CSS */\n\
                   /* -------------------- */";
        assert_eq!(parse(css, None).unwrap(), vec![]);
    }

    #[test]
    fn module_after_summary_is_parsed() {
        let css = "/* # SUMMARY ---------- */\n\
                   /* -------------------- */\n\
                   /* # Module: Utilities */\n\
                   /* Test: T */\n\
                   /*   ✔ fine */";
        let modules = parse(css, None).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].tests[0].assertions.len(), 1);
    }

    #[test]
    fn unknown_rules_outside_headers_are_ignored() {
        assert_eq!(parse(".foo { -prop: value; }", None).unwrap(), vec![]);
    }

    #[test]
    fn statement_at_rules_are_ignored() {
        let css = "@hello \"foo\";\n\
                   /* # Module: Utilities */\n\
                   /* Test: T */\n\
                   /*   ✔ fine */";
        let modules = parse(css, None).unwrap();
        assert_eq!(modules[0].name, "Utilities");
    }

    #[test]
    fn rule_between_module_and_test_is_skipped_in_place() {
        let css = "/* # Module: M */\n\
                   .foo { -prop: value; }\n\
                   /* Test: T */\n\
                   /*   ✔ fine */";
        let modules = parse(css, None).unwrap();
        assert_eq!(modules[0].tests.len(), 1);
        assert_eq!(modules[0].tests[0].name, "T");
    }

    #[test]
    fn stray_detail_line_before_next_module() {
        let css = "/* # Module: M */\n\
                   /* Test: T */\n\
                   /*   ✖ FAILED: [assert-true] True should assert true. */\n\
                   /*     - foobar */\n\
                   /* # Module: M2 */";
        let modules = parse(css, None).unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].tests[0].assertions.len(), 1);
        assert_eq!(modules[1].name, "M2");
        assert!(modules[1].tests.is_empty());
    }

    #[test]
    fn blank_comments_are_skipped_everywhere() {
        let css = "/*  */\n\
                   /* # Module: M */\n\
                   /*  */\n\
                   /* Test: T */\n\
                   /*  */\n\
                   /*   ✔ Does the thing right */";
        let modules = parse(css, None).unwrap();
        assert_eq!(
            modules[0].tests[0].assertions[0].description,
            "Does the thing right"
        );
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn rule_inside_summary_is_a_structural_error() {
        let css = "/* # SUMMARY ---------- */\n.foo { -prop: value; }";
        let err = parse(css, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Line 2, column 1: Unexpected rule type \"rule\"; looking for end summary.\n\
             -- Context --\n\
             /* # SUMMARY ---------- */\n\
             .foo { -prop: value; }\n\
             ^\n"
        );
    }

    #[test]
    fn context_line_count_is_honored() {
        let css = "/* # SUMMARY ---------- */\n.foo { -prop: value; }";
        let err = parse(css, Some(1)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Line 2, column 1: Unexpected rule type \"rule\"; looking for end summary.\n\
             -- Context --\n\
             .foo { -prop: value; }\n\
             ^\n"
        );
    }

    #[test]
    fn rule_instead_of_failure_detail_is_an_error() {
        let css = "/* # Module: M */\n\
                   /* Test: T */\n\
                   /*   ✖ FAILED: [assert-true] broke */\n\
                   .foo { -prop: val; }";
        let err = parse(css, None).unwrap_err();
        assert!(err.to_string().starts_with(
            "Line 4, column 1: Unexpected rule type \"rule\"; looking for output/expected."
        ));
    }

    #[test]
    fn rule_instead_of_output_is_an_error() {
        let css = "/* # Module: M */\n\
                   /* Test: T */\n\
                   /*   ASSERT: blocks   */\n\
                   .foo { -prop: val; }";
        let err = parse(css, None).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Line 4, column 1: Unexpected rule type \"rule\"; looking for OUTPUT."));
    }

    #[test]
    fn comment_instead_of_output_is_an_error() {
        let css = "/* # Module: M */\n\
                   /* Test: T */\n\
                   /*   ASSERT: blocks   */\n\
                   /* foo */";
        let err = parse(css, None).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Line 4, column 1: Unexpected comment \"foo\"; looking for OUTPUT."));
    }

    #[test]
    fn comment_instead_of_expected_is_an_error() {
        let css = "/* # Module: M */\n\
                   /* Test: T */\n\
                   /*   ASSERT: blocks   */\n\
                   /*   OUTPUT   */\n\
                   .x {\n  a: 1; }\n\
                   /*   END_OUTPUT   */\n\
                   /* foo */";
        let err = parse(css, None).unwrap_err();
        assert!(err
            .to_string()
            .contains("Unexpected comment \"foo\"; looking for EXPECTED."));
    }

    #[test]
    fn comment_instead_of_end_assert_is_an_error() {
        let css = "/* # Module: M */\n\
                   /* Test: T */\n\
                   /*   ASSERT: blocks   */\n\
                   /*   OUTPUT   */\n\
                   .x {\n  a: 1; }\n\
                   /*   END_OUTPUT   */\n\
                   /*   EXPECTED   */\n\
                   .x {\n  a: 1; }\n\
                   /*   END_EXPECTED   */\n\
                   /* foo */";
        let err = parse(css, None).unwrap_err();
        assert!(err
            .to_string()
            .contains("Unexpected comment \"foo\"; looking for END_ASSERT."));
    }

    #[test]
    fn rule_instead_of_end_assert_is_an_error() {
        let css = "/* # Module: M */\n\
                   /* Test: T */\n\
                   /*   ASSERT: blocks   */\n\
                   /*   OUTPUT   */\n\
                   .x {\n  a: 1; }\n\
                   /*   END_OUTPUT   */\n\
                   /*   EXPECTED   */\n\
                   .x {\n  a: 1; }\n\
                   /*   END_EXPECTED   */\n\
                   .foo { -prop: val; }";
        let err = parse(css, None).unwrap_err();
        assert!(err
            .to_string()
            .contains("Unexpected rule type \"rule\"; looking for END_ASSERT."));
    }

    #[test]
    fn invalid_css_is_a_css_error() {
        let err = parse(".x { a: 1;", None).unwrap_err();
        assert!(matches!(err, ParseError::Css(_)));
    }
}
