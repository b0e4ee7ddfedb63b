//! Tree replay through `describe`/`it` callbacks.

use crate::parse::model::Module;
use crate::runner::failure::format_failure_message;

/// Host callback invoked with a block name and a body to run.
///
/// `describe` implementations usually record the name and invoke the body
/// immediately; `it` implementations may additionally catch panics to turn
/// them into recorded failures. State captured by the callbacks needs
/// interior mutability (`RefCell` or similar), since bodies may nest.
pub type BlockFn<'a> = &'a dyn Fn(&str, &dyn Fn());

/// Walk `modules`, wrapping each module in `describe` and each test in `it`.
///
/// Submodules are described before the parent's own tests, depth-first. The
/// body passed to `it` panics with [`format_failure_message`] on the first
/// assertion that did not pass; the panic propagates through the host
/// callback unmodified.
pub fn replay(modules: &[Module], describe: BlockFn, it: BlockFn) {
    for module in modules {
        describe_module(module, describe, it);
    }
}

fn describe_module(module: &Module, describe: BlockFn, it: BlockFn) {
    describe(&module.name, &|| {
        for submodule in &module.modules {
            describe_module(submodule, describe, it);
        }
        for test in &module.tests {
            it(&test.name, &|| {
                for assertion in &test.assertions {
                    if !assertion.passed {
                        panic!("{}", format_failure_message(assertion));
                    }
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::parse::model::{Assertion, Test};

    use super::*;

    fn tree() -> Vec<Module> {
        vec![Module {
            name: "Outer".into(),
            tests: vec![Test {
                name: "works".into(),
                assertions: vec![Assertion {
                    description: "fine".into(),
                    passed: true,
                    ..Assertion::default()
                }],
            }],
            modules: vec![Module {
                name: "Inner".into(),
                tests: vec![Test {
                    name: "nested works".into(),
                    assertions: vec![],
                }],
                modules: vec![],
            }],
        }]
    }

    #[test]
    fn replays_modules_depth_first() {
        let log = RefCell::new(Vec::<String>::new());
        let describe: BlockFn = &|name, body| {
            log.borrow_mut().push(format!("describe {name}"));
            body();
        };
        let it: BlockFn = &|name, body| {
            log.borrow_mut().push(format!("it {name}"));
            body();
        };
        replay(&tree(), describe, it);
        assert_eq!(
            *log.borrow(),
            vec![
                "describe Outer",
                "describe Inner",
                "it nested works",
                "it works",
            ]
        );
    }

    #[test]
    fn failed_assertion_panics_with_formatted_message() {
        let modules = vec![Module {
            name: "M".into(),
            tests: vec![Test {
                name: "T".into(),
                assertions: vec![Assertion {
                    description: "broke".into(),
                    passed: false,
                    assertion_type: Some("assert-true".into()),
                    ..Assertion::default()
                }],
            }],
            modules: vec![],
        }];
        let describe: BlockFn = &|_, body| body();
        let it: BlockFn = &|_, body| body();
        let panic = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            replay(&modules, describe, it);
        }))
        .unwrap_err();
        let message = panic.downcast_ref::<String>().expect("string payload");
        assert!(message.starts_with("broke [type: assert-true]"));
    }

    #[test]
    fn passing_tree_replays_without_panicking() {
        let describe: BlockFn = &|_, body| body();
        let it: BlockFn = &|_, body| body();
        replay(&tree(), describe, it);
    }
}
