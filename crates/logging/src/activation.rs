//! crates/logging/src/activation.rs
//! Tag stack, enabled/disabled sets and the activation resolver.

use std::collections::BTreeSet;

/// Activation state of one logger.
///
/// Only the innermost entered tag takes part in resolution. With the
/// active-switch on, that tag is active unless it is in the disabled set;
/// with the switch off, it is active only when it is in the enabled set.
/// With no tag entered the switch alone decides. The result is cached in
/// `is_active` and recomputed after every mutation.
#[derive(Clone, Debug)]
pub(crate) struct Activation {
    tags: Vec<String>,
    enabled: BTreeSet<String>,
    disabled: BTreeSet<String>,
    active_switch: bool,
    manual_switch: bool,
    is_active: bool,
}

impl Default for Activation {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            enabled: BTreeSet::new(),
            disabled: BTreeSet::new(),
            active_switch: true,
            manual_switch: true,
            is_active: true,
        }
    }
}

impl Activation {
    /// Whether a write issued now produces output: manual switch first, then
    /// the resolved tag state.
    pub(crate) fn allows_output(&self) -> bool {
        self.manual_switch && self.is_active
    }

    pub(crate) fn is_active(&self) -> bool {
        self.is_active
    }

    pub(crate) fn active_switch(&self) -> bool {
        self.active_switch
    }

    pub(crate) fn manual_switch(&self) -> bool {
        self.manual_switch
    }

    pub(crate) fn tags(&self) -> &[String] {
        &self.tags
    }

    pub(crate) fn innermost_tag(&self) -> Option<&str> {
        self.tags.last().map(String::as_str)
    }

    pub(crate) fn enabled(&self) -> &BTreeSet<String> {
        &self.enabled
    }

    pub(crate) fn disabled(&self) -> &BTreeSet<String> {
        &self.disabled
    }

    pub(crate) fn set_manual_switch(&mut self, on: bool) {
        self.manual_switch = on;
    }

    pub(crate) fn set_active_switch(&mut self, on: bool) {
        self.active_switch = on;
        self.resolve();
    }

    pub(crate) fn push_tag(&mut self, tag: String) {
        self.tags.push(tag);
        self.resolve();
    }

    pub(crate) fn pop_tag(&mut self) -> Option<String> {
        let popped = self.tags.pop();
        self.resolve();
        popped
    }

    /// Returns `true` when the tag was not already enabled.
    pub(crate) fn insert_enabled(&mut self, tag: &str) -> bool {
        let inserted = self.enabled.insert(tag.to_owned());
        self.resolve();
        inserted
    }

    pub(crate) fn remove_enabled(&mut self, tag: &str) -> bool {
        let removed = self.enabled.remove(tag);
        self.resolve();
        removed
    }

    /// Returns `true` when the tag was not already disabled.
    pub(crate) fn insert_disabled(&mut self, tag: &str) -> bool {
        let inserted = self.disabled.insert(tag.to_owned());
        self.resolve();
        inserted
    }

    pub(crate) fn remove_disabled(&mut self, tag: &str) -> bool {
        let removed = self.disabled.remove(tag);
        self.resolve();
        removed
    }

    fn resolve(&mut self) {
        self.is_active = match self.tags.last() {
            None => self.active_switch,
            Some(tag) if self.active_switch => !self.disabled.contains(tag),
            Some(tag) => self.enabled.contains(tag),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_active() {
        let activation = Activation::default();
        assert!(activation.is_active());
        assert!(activation.allows_output());
        assert!(activation.tags().is_empty());
    }

    #[test]
    fn empty_stack_follows_active_switch() {
        let mut activation = Activation::default();
        activation.set_active_switch(false);
        assert!(!activation.is_active());
        activation.set_active_switch(true);
        assert!(activation.is_active());
    }

    #[test]
    fn switch_on_consults_disabled_set_only() {
        let mut activation = Activation::default();
        activation.insert_enabled("quiet");
        activation.insert_disabled("noisy");

        activation.push_tag("noisy".to_owned());
        assert!(!activation.is_active());
        activation.pop_tag();

        activation.push_tag("anything".to_owned());
        assert!(activation.is_active());
    }

    #[test]
    fn switch_off_consults_enabled_set_only() {
        let mut activation = Activation::default();
        activation.set_active_switch(false);
        activation.insert_enabled("wanted");
        activation.insert_disabled("other");

        activation.push_tag("wanted".to_owned());
        assert!(activation.is_active());
        activation.pop_tag();

        activation.push_tag("other".to_owned());
        assert!(!activation.is_active());
        activation.pop_tag();

        activation.push_tag("unlisted".to_owned());
        assert!(!activation.is_active());
    }

    #[test]
    fn only_innermost_tag_matters() {
        let mut activation = Activation::default();
        activation.insert_disabled("outer");
        activation.push_tag("outer".to_owned());
        assert!(!activation.is_active());

        activation.push_tag("inner".to_owned());
        assert!(activation.is_active());

        activation.pop_tag();
        assert!(!activation.is_active());
    }

    #[test]
    fn membership_change_applies_to_entered_tag() {
        let mut activation = Activation::default();
        activation.push_tag("live".to_owned());
        assert!(activation.is_active());

        activation.insert_disabled("live");
        assert!(!activation.is_active());

        activation.remove_disabled("live");
        assert!(activation.is_active());
    }

    #[test]
    fn disabled_wins_over_enabled_while_switch_on() {
        let mut activation = Activation::default();
        activation.insert_enabled("both");
        activation.insert_disabled("both");
        activation.push_tag("both".to_owned());
        assert!(!activation.is_active());
    }

    #[test]
    fn enabled_wins_over_disabled_while_switch_off() {
        let mut activation = Activation::default();
        activation.set_active_switch(false);
        activation.insert_enabled("both");
        activation.insert_disabled("both");
        activation.push_tag("both".to_owned());
        assert!(activation.is_active());
    }

    #[test]
    fn manual_switch_overrides_resolution() {
        let mut activation = Activation::default();
        activation.set_manual_switch(false);
        assert!(activation.is_active());
        assert!(!activation.allows_output());
        activation.set_manual_switch(true);
        assert!(activation.allows_output());
    }

    #[test]
    fn insert_reports_whether_membership_changed() {
        let mut activation = Activation::default();
        assert!(activation.insert_enabled("tag"));
        assert!(!activation.insert_enabled("tag"));
        assert!(activation.remove_enabled("tag"));
        assert!(!activation.remove_enabled("tag"));
    }
}
