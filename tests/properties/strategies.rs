//! Shared generators.

use proptest::prelude::*;

use tilde::domain::entities::CustomCancel;
use tilde::Action;

#[derive(Debug)]
pub struct Named(pub String);

impl CustomCancel for Named {
    fn name(&self) -> &str {
        &self.0
    }
}

pub fn command() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9 _./-]{0,20}[a-z0-9]")
        .unwrap()
        .prop_filter("no resume prefix", |s| !s.starts_with("__resume-watch"))
}

pub fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(|n| Action::custom(Named(n))),
        "[a-z ]{0,16}".prop_map(|m| Action::handle_error(anyhow::anyhow!(m))),
        proptest::collection::vec(command(), 0..3).prop_map(Action::run),
        Just(Action::CancelWatch),
        Just(Action::Reload),
        Just(Action::Trigger),
        Just(Action::Ignore),
    ]
}

pub fn continue_action() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Trigger), Just(Action::Ignore)]
}

pub fn cancel_action() -> impl Strategy<Value = Action> {
    action().prop_filter("cancel only", Action::is_cancel)
}
