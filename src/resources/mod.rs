use crate::config::{MirrorConfig, MirrorParameter};
use crate::events::EditTarget;
use crate::playback::SampleQuantities;
use bevy::prelude::*;

/// Mutable mirror parameters kept in sync with the input fields
///
/// Only ever read by value: a trajectory build takes a snapshot through
/// [`ConfigurationStore::get`], so later edits cannot reach it.
#[derive(Resource, Deref, DerefMut, Copy, Clone, Default, PartialEq, Debug)]
pub struct ConfigurationStore(MirrorConfig);

impl ConfigurationStore {
    pub fn new(config: MirrorConfig) -> Self {
        Self(config)
    }

    pub fn get(&self) -> MirrorConfig {
        self.0
    }

    pub fn set(&mut self, parameter: MirrorParameter, raw: &str) {
        parameter.apply(&mut self.0, raw);
    }

    pub fn replace(&mut self, config: MirrorConfig) {
        self.0 = config;
    }
}

/// Parses a stride entry, rejecting anything that is not a positive integer
pub fn parse_stride(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|&stride| stride > 0)
}

/// Quantities at the most recently published cursor
#[derive(Resource, Deref, DerefMut, Copy, Clone, Default, PartialEq, Debug)]
pub struct SampleReadout(pub Option<SampleQuantities>);

/// Input field currently receiving keystrokes, with the text typed so far
///
/// While a field is focused, keyboard shortcuts are suppressed.
#[derive(Resource, Clone, Default, PartialEq, Debug)]
pub struct ParameterFocus {
    pub target: Option<EditTarget>,
    pub buffer: String,
}

impl ParameterFocus {
    pub fn is_active(&self) -> bool {
        self.target.is_some()
    }

    pub fn focus(&mut self, target: EditTarget) {
        self.target = Some(target);
        self.buffer.clear();
    }

    /// Drops focus, returning the target and committed text
    pub fn take(&mut self) -> Option<(EditTarget, String)> {
        let target = self.target.take()?;
        Some((target, std::mem::take(&mut self.buffer)))
    }

    pub fn cancel(&mut self) {
        self.target = None;
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_snapshot_is_detached() {
        let mut store = ConfigurationStore::default();
        let snapshot = store.get();

        store.set(MirrorParameter::FieldStrength, "3");

        assert_eq!(snapshot.field_strength, 1.0);
        assert_eq!(store.get().field_strength, 3.0);
    }

    #[test]
    fn test_store_malformed_real_becomes_nan() {
        let mut store = ConfigurationStore::default();
        store.set(MirrorParameter::ParallelVelocity, "fast");
        assert!(store.parallel_velocity.is_nan());
    }

    #[test]
    fn test_store_malformed_steps_become_zero() {
        let mut store = ConfigurationStore::default();
        store.set(MirrorParameter::StepCount, "many");
        assert_eq!(store.step_count, 0);
        assert_eq!(store.sample_count(), 1);
    }

    #[test]
    fn test_replace() {
        let mut store = ConfigurationStore::default();
        let config = MirrorConfig {
            step_count: 5,
            ..MirrorConfig::default()
        };
        store.replace(config);
        assert_eq!(store.get(), config);
    }

    #[test]
    fn test_focus_take_and_cancel() {
        let mut focus = ParameterFocus::default();
        assert!(focus.take().is_none());

        focus.focus(EditTarget::Stride);
        focus.buffer.push_str("12");
        assert!(focus.is_active());
        assert_eq!(focus.take(), Some((EditTarget::Stride, "12".to_string())));
        assert!(!focus.is_active());

        focus.focus(EditTarget::Mirror(MirrorParameter::StepCount));
        focus.buffer.push('9');
        focus.cancel();
        assert!(!focus.is_active());
        assert!(focus.buffer.is_empty());
    }

    #[test]
    fn test_parse_stride() {
        assert_eq!(parse_stride("10"), Some(10));
        assert_eq!(parse_stride(" 3 "), Some(3));
        assert_eq!(parse_stride("0"), None);
        assert_eq!(parse_stride("-2"), None);
        assert_eq!(parse_stride("2.5"), None);
        assert_eq!(parse_stride(""), None);
    }
}
