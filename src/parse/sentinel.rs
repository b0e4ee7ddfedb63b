//! Sentinel strings of the test-output comment language.
//!
//! All matching is case-sensitive: prefixes are matched with
//! `str::starts_with` after trimming, block delimiters are matched exactly.

pub(crate) const MODULE: &str = "# Module: ";
pub(crate) const MODULE_NESTING: &str = " :: ";
pub(crate) const SUMMARY: &str = "# SUMMARY ";
pub(crate) const END_SUMMARY: &str = "----------";
pub(crate) const TEST: &str = "Test: ";
pub(crate) const PASS: &str = "✔ ";
pub(crate) const FAIL: &str = "✖ FAILED: [";
pub(crate) const END_FAIL: &str = "]";
pub(crate) const ASSERT: &str = "ASSERT: ";
pub(crate) const FAILURE_DETAIL: &str = "- ";
pub(crate) const DETAIL_OUTPUT: &str = "Output: ";
pub(crate) const DETAIL_EXPECTED: &str = "Expected: ";
pub(crate) const DETAILS_SEPARATOR: &str = ": ";
pub(crate) const OUTPUT_START: &str = "OUTPUT";
pub(crate) const OUTPUT_END: &str = "END_OUTPUT";
pub(crate) const EXPECTED_START: &str = "EXPECTED";
pub(crate) const EXPECTED_END: &str = "END_EXPECTED";
pub(crate) const CONTAINED_START: &str = "CONTAINED";
pub(crate) const CONTAINED_END: &str = "END_CONTAINED";
pub(crate) const CONTAINS_STRING_START: &str = "CONTAINS_STRING";
pub(crate) const CONTAINS_STRING_END: &str = "END_CONTAINS_STRING";
pub(crate) const ASSERT_END: &str = "END_ASSERT";
