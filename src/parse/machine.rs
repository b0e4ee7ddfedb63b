//! The comment-stream state machine.
//!
//! Each state names the construct the parser is waiting for. A single
//! dispatcher matches on the state and hands the node to that state's
//! handler; handlers return the next state. Where the grammar says "not
//! mine — try the enclosing construct" (an unrecognized comment while
//! waiting for a test header, say), the handler re-dispatches the same node
//! to the outer handler directly.

use crate::css::node::Node;
use crate::css::serialize::serialize;
use crate::fragment::contains;
use crate::parse::context::Context;
use crate::parse::error::{ParseError, SourceContext};
use crate::parse::model::{Assertion, Module, Test};
use crate::parse::sentinel;

/// Placeholder description for a pass sentinel with nothing after it.
const NO_DESCRIPTION: &str = "<no description>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    AwaitModule,
    AwaitEndSummary,
    AwaitTest,
    AwaitAssertion,
    AwaitFailureDetail,
    AwaitOutputStart,
    AwaitOutputBody,
    AwaitExpectedStart,
    AwaitExpectedBody,
    AwaitContainedBody,
    AwaitContainsStringBody,
    AwaitEndAssertion,
}

pub(crate) fn transition(
    state: State,
    node: &Node,
    ctx: &mut Context,
    src: &SourceContext,
) -> Result<State, ParseError> {
    match state {
        State::AwaitModule => Ok(await_module(node, ctx)),
        State::AwaitEndSummary => await_end_summary(node, src),
        State::AwaitTest => Ok(await_test(node, ctx)),
        State::AwaitAssertion => Ok(await_assertion(node, ctx)),
        State::AwaitFailureDetail => await_failure_detail(node, ctx, src),
        State::AwaitOutputStart => await_output_start(node, ctx, src),
        State::AwaitOutputBody => Ok(await_output_body(node, ctx)),
        State::AwaitExpectedStart => await_expected_start(node, ctx, src),
        State::AwaitExpectedBody => Ok(await_expected_body(node, ctx)),
        State::AwaitContainedBody => Ok(await_contained_body(node, ctx)),
        State::AwaitContainsStringBody => Ok(await_contains_string_body(node, ctx)),
        State::AwaitEndAssertion => await_end_assertion(node, ctx, src),
    }
}

fn unexpected_type(node: &Node) -> String {
    format!("Unexpected rule type \"{}\"", node.type_name())
}

fn unexpected_comment(text: &str) -> String {
    format!("Unexpected comment \"{text}\"")
}

// ── Search states ────────────────────────────────────────────────────

fn await_module(node: &Node, ctx: &mut Context) -> State {
    // Non-comment noise is fine while searching for a header.
    let Node::Comment { text, .. } = node else {
        return State::AwaitModule;
    };
    let text = text.trim();
    if text.is_empty() {
        return State::AwaitModule;
    }
    if let Some(name) = text.strip_prefix(sentinel::MODULE) {
        ctx.finish_module();
        ctx.current_module = Some(Module::new(name));
        return State::AwaitTest;
    }
    if text.starts_with(sentinel::SUMMARY) {
        return State::AwaitEndSummary;
    }
    State::AwaitModule
}

fn await_end_summary(node: &Node, src: &SourceContext) -> Result<State, ParseError> {
    let Node::Comment { text, .. } = node else {
        return Err(src.error(unexpected_type(node), "end summary", node.position()));
    };
    if text.trim().starts_with(sentinel::END_SUMMARY) {
        Ok(State::AwaitModule)
    } else {
        Ok(State::AwaitEndSummary)
    }
}

fn await_test(node: &Node, ctx: &mut Context) -> State {
    let Node::Comment { text, .. } = node else {
        return State::AwaitTest;
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return State::AwaitTest;
    }
    // decorative separator under a module header
    if trimmed.chars().all(|c| c == '-') {
        return State::AwaitTest;
    }
    if let Some(name) = trimmed.strip_prefix(sentinel::TEST) {
        ctx.finish_test();
        ctx.current_test = Some(Test::new(name));
        return State::AwaitAssertion;
    }
    await_module(node, ctx)
}

fn await_assertion(node: &Node, ctx: &mut Context) -> State {
    let Node::Comment { text, .. } = node else {
        return State::AwaitAssertion;
    };
    // Only the left side is trimmed: a bare pass sentinel keeps its trailing
    // space, which is how the no-description case is recognized.
    let text = text.trim_start();
    if text.is_empty() {
        return State::AwaitAssertion;
    }
    if let Some(rest) = text.strip_prefix(sentinel::PASS) {
        ctx.finish_assertion();
        let description = rest.trim();
        ctx.current_assertion = Some(Assertion {
            description: if description.is_empty() {
                NO_DESCRIPTION.to_string()
            } else {
                description.to_string()
            },
            passed: true,
            ..Assertion::default()
        });
        return State::AwaitAssertion;
    }
    if text.starts_with(sentinel::FAIL) {
        ctx.finish_assertion();
        let after = &text[sentinel::FAIL.len()..];
        let (assertion_type, description) = match after.find(sentinel::END_FAIL) {
            Some(end) => (
                after[..end].trim(),
                after[end + sentinel::END_FAIL.len()..].trim(),
            ),
            None => (after.trim(), ""),
        };
        ctx.current_assertion = Some(Assertion {
            description: description.to_string(),
            passed: false,
            assertion_type: Some(assertion_type.to_string()),
            ..Assertion::default()
        });
        return State::AwaitFailureDetail;
    }
    if let Some(rest) = text.strip_prefix(sentinel::ASSERT) {
        ctx.finish_assertion();
        ctx.current_assertion = Some(Assertion {
            description: rest.trim().to_string(),
            assertion_type: Some("equal".to_string()),
            ..Assertion::default()
        });
        return State::AwaitOutputStart;
    }
    await_test(node, ctx)
}

// ── Inline failure details ───────────────────────────────────────────

fn await_failure_detail(
    node: &Node,
    ctx: &mut Context,
    src: &SourceContext,
) -> Result<State, ParseError> {
    let Node::Comment { text, .. } = node else {
        return Err(src.error(unexpected_type(node), "output/expected", node.position()));
    };
    let trimmed = text.trim();
    if let Some(detail) = trimmed.strip_prefix(sentinel::FAILURE_DETAIL) {
        if detail.starts_with(sentinel::DETAIL_OUTPUT) {
            let value = detail_value(detail, sentinel::DETAIL_OUTPUT);
            if let Some(assertion) = ctx.current_assertion.as_mut() {
                assertion.output = Some(value);
            }
            return Ok(State::AwaitFailureDetail);
        }
        if detail.starts_with(sentinel::DETAIL_EXPECTED) {
            let value = detail_value(detail, sentinel::DETAIL_EXPECTED);
            if let Some(assertion) = ctx.current_assertion.as_mut() {
                assertion.expected = Some(value);
            }
            return Ok(State::AwaitFailureDetail);
        }
        if let Some(split_at) = detail.find(sentinel::DETAILS_SEPARATOR) {
            let key = detail[..split_at].to_lowercase();
            let value = detail[split_at + sentinel::DETAILS_SEPARATOR.len()..].to_string();
            if let Some(assertion) = ctx.current_assertion.as_mut() {
                if key == "details" {
                    assertion.details = Some(value);
                } else {
                    assertion.extra.insert(key, value);
                }
            }
            return Ok(State::AwaitFailureDetail);
        }
    }
    Ok(await_assertion(node, ctx))
}

/// Extract `[unit] value` from a detail line like `Output: [unit] value`.
/// When no bracketed label is present the raw text after the field token is
/// kept as-is.
fn detail_value(detail: &str, token: &str) -> String {
    match (detail.find('['), detail.find(']')) {
        (Some(start), Some(end)) if start < end => {
            let label = &detail[start..=end];
            let content = detail[end + 1..].trim_start();
            format!("{label} {content}")
        }
        _ => detail[token.len()..].to_string(),
    }
}

// ── Block-assertion states ───────────────────────────────────────────

fn await_output_start(
    node: &Node,
    ctx: &mut Context,
    src: &SourceContext,
) -> Result<State, ParseError> {
    let Node::Comment { text, .. } = node else {
        return Err(src.error(unexpected_type(node), "OUTPUT", node.position()));
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(State::AwaitOutputStart);
    }
    if text == sentinel::OUTPUT_START {
        ctx.capture = Some(Vec::new());
        return Ok(State::AwaitOutputBody);
    }
    Err(src.error(unexpected_comment(text), "OUTPUT", node.position()))
}

fn await_output_body(node: &Node, ctx: &mut Context) -> State {
    if let Node::Comment { text, .. } = node {
        if text.trim() == sentinel::OUTPUT_END {
            let nodes = ctx.capture.take().unwrap_or_default();
            if let Some(assertion) = ctx.current_assertion.as_mut() {
                assertion.output = Some(serialize(&nodes));
            }
            return State::AwaitExpectedStart;
        }
    }
    if let Some(capture) = ctx.capture.as_mut() {
        capture.push(node.clone());
    }
    State::AwaitOutputBody
}

fn await_expected_start(
    node: &Node,
    ctx: &mut Context,
    src: &SourceContext,
) -> Result<State, ParseError> {
    let Node::Comment { text, .. } = node else {
        return Err(src.error(unexpected_type(node), "EXPECTED", node.position()));
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(State::AwaitExpectedStart);
    }
    if text == sentinel::EXPECTED_START {
        ctx.capture = Some(Vec::new());
        return Ok(State::AwaitExpectedBody);
    }
    if text == sentinel::CONTAINED_START {
        ctx.capture = Some(Vec::new());
        return Ok(State::AwaitContainedBody);
    }
    if text == sentinel::CONTAINS_STRING_START {
        ctx.capture = Some(Vec::new());
        return Ok(State::AwaitContainsStringBody);
    }
    Err(src.error(unexpected_comment(text), "EXPECTED", node.position()))
}

fn await_expected_body(node: &Node, ctx: &mut Context) -> State {
    if let Node::Comment { text, .. } = node {
        if text.trim() == sentinel::EXPECTED_END {
            let nodes = ctx.capture.take().unwrap_or_default();
            if let Some(assertion) = ctx.current_assertion.as_mut() {
                let expected = serialize(&nodes);
                assertion.passed = assertion.output.as_deref() == Some(expected.as_str());
                assertion.expected = Some(expected);
            }
            return State::AwaitEndAssertion;
        }
    }
    if let Some(capture) = ctx.capture.as_mut() {
        capture.push(node.clone());
    }
    State::AwaitExpectedBody
}

fn await_contained_body(node: &Node, ctx: &mut Context) -> State {
    if let Node::Comment { text, .. } = node {
        if text.trim() == sentinel::CONTAINED_END {
            let nodes = ctx.capture.take().unwrap_or_default();
            if let Some(assertion) = ctx.current_assertion.as_mut() {
                let expected = serialize(&nodes);
                assertion.passed =
                    contains(assertion.output.as_deref().unwrap_or_default(), &expected);
                assertion.expected = Some(expected);
                assertion.assertion_type = Some("contains".to_string());
            }
            return State::AwaitEndAssertion;
        }
    }
    if let Some(capture) = ctx.capture.as_mut() {
        capture.push(node.clone());
    }
    State::AwaitContainedBody
}

fn await_contains_string_body(node: &Node, ctx: &mut Context) -> State {
    if let Node::Comment { text, .. } = node {
        if text.trim() == sentinel::CONTAINS_STRING_END {
            let nodes = ctx.capture.take().unwrap_or_default();
            if let Some(assertion) = ctx.current_assertion.as_mut() {
                let expected = unwrap_comment(&serialize(&nodes));
                assertion.passed = assertion
                    .output
                    .as_deref()
                    .is_some_and(|output| output.contains(&expected));
                assertion.expected = Some(expected);
                assertion.assertion_type = Some("contains-string".to_string());
            }
            return State::AwaitEndAssertion;
        }
    }
    if let Some(capture) = ctx.capture.as_mut() {
        capture.push(node.clone());
    }
    State::AwaitContainsStringBody
}

/// The expected string of a contains-string block travels wrapped in a CSS
/// comment (it need not be valid CSS on its own); peel one wrapper.
fn unwrap_comment(serialized: &str) -> String {
    let text = serialized.trim();
    let text = text.strip_prefix("/*").unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text);
    text.trim().to_string()
}

fn await_end_assertion(
    node: &Node,
    ctx: &mut Context,
    src: &SourceContext,
) -> Result<State, ParseError> {
    let Node::Comment { text, .. } = node else {
        return Err(src.error(unexpected_type(node), "END_ASSERT", node.position()));
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(State::AwaitEndAssertion);
    }
    if text == sentinel::ASSERT_END {
        ctx.finish_assertion();
        return Ok(State::AwaitAssertion);
    }
    Err(src.error(unexpected_comment(text), "END_ASSERT", node.position()))
}
