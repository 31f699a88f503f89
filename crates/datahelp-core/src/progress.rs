//! Build progress model.
//!
//! A progress snapshot is the ordered list of steps plus a cursor. During a
//! single build attempt the cursor only moves forward: every step before it
//! is completed, the step under it is active, and the rest are untouched.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::i18n::{MessageKey, Translator};

/// The fixed, ordered stages of a report build.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StageId {
    Collecting,
    Processing,
    Summarizing,
    Ready,
}

impl StageId {
    /// All stages in execution order.
    pub fn ordered() -> Vec<StageId> {
        StageId::iter().collect()
    }

    pub fn message_key(&self) -> MessageKey {
        match self {
            StageId::Collecting => MessageKey::Collecting,
            StageId::Processing => MessageKey::Processing,
            StageId::Summarizing => MessageKey::Summarizing,
            StageId::Ready => MessageKey::Ready,
        }
    }

    /// English label, used until a translator relabels the steps.
    pub fn default_label(&self) -> &'static str {
        match self {
            StageId::Collecting => "Collecting Data",
            StageId::Processing => "Processing",
            StageId::Summarizing => "Summarizing",
            StageId::Ready => "Ready",
        }
    }
}

/// One entry in the progress list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStep {
    pub id: StageId,
    pub label: String,
    pub completed: bool,
    pub active: bool,
}

/// Progress snapshot for the current build attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildProgress {
    steps: Vec<ProgressStep>,
    current_step: usize,
}

impl BuildProgress {
    /// All-inactive, all-incomplete snapshot with English labels.
    pub fn initial() -> Self {
        let steps = StageId::ordered()
            .into_iter()
            .map(|id| ProgressStep {
                id,
                label: id.default_label().to_string(),
                completed: false,
                active: false,
            })
            .collect();
        Self {
            steps,
            current_step: 0,
        }
    }

    /// Initial snapshot with labels in the given language.
    pub fn localized(translator: &dyn Translator, language: &str) -> Self {
        let mut progress = Self::initial();
        progress.relabel(translator, language);
        progress
    }

    pub fn relabel(&mut self, translator: &dyn Translator, language: &str) {
        for step in &mut self.steps {
            step.label = translator.message(language, step.id.message_key());
        }
    }

    pub fn steps(&self) -> &[ProgressStep] {
        &self.steps
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn stage_at(&self, index: usize) -> Option<StageId> {
        self.steps.get(index).map(|step| step.id)
    }

    /// Index of the active step, if any.
    pub fn active_index(&self) -> Option<usize> {
        self.steps.iter().position(|step| step.active)
    }

    /// True once every stage has completed.
    pub fn is_finished(&self) -> bool {
        self.current_step == self.steps.len()
    }

    /// Begins an attempt: cursor at 0, first step active.
    pub fn start(&mut self) {
        self.reset();
        if let Some(first) = self.steps.first_mut() {
            first.active = true;
        }
    }

    /// Marks stage `index` done and activates the next one.
    ///
    /// Stages complete strictly in order; completing anything other than the
    /// stage under the cursor leaves the snapshot untouched.
    pub fn complete_stage(&mut self, index: usize) -> bool {
        if index != self.current_step || index >= self.steps.len() {
            return false;
        }
        for (i, step) in self.steps.iter_mut().enumerate() {
            step.completed = i <= index;
            step.active = i == index + 1;
        }
        self.current_step = index + 1;
        true
    }

    /// Back to the all-inactive, all-incomplete snapshot. Labels are kept.
    pub fn reset(&mut self) {
        for step in &mut self.steps {
            step.completed = false;
            step.active = false;
        }
        self.current_step = 0;
    }

    /// True when the snapshot is pristine (nothing active, nothing done).
    pub fn is_reset(&self) -> bool {
        self.current_step == 0 && self.steps.iter().all(|s| !s.completed && !s.active)
    }

    /// Checks the snapshot invariants: completed steps form a prefix ending
    /// at the cursor, and only the step under the cursor may be active.
    pub fn is_consistent(&self) -> bool {
        let completed_prefix = self
            .steps
            .iter()
            .enumerate()
            .all(|(i, step)| step.completed == (i < self.current_step));
        let active_count = self.steps.iter().filter(|s| s.active).count();
        let active_ok = match self.active_index() {
            Some(i) => i == self.current_step,
            None => true,
        };
        self.current_step <= self.steps.len() && completed_prefix && active_count <= 1 && active_ok
    }
}

impl Default for BuildProgress {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::TranslationTable;

    #[test]
    fn test_stage_order() {
        let ids: Vec<String> = StageId::ordered().iter().map(|s| s.to_string()).collect();
        assert_eq!(ids, ["collecting", "processing", "summarizing", "ready"]);
    }

    #[test]
    fn test_initial_snapshot() {
        let progress = BuildProgress::initial();
        assert_eq!(progress.len(), 4);
        assert!(progress.is_reset());
        assert!(progress.is_consistent());
        assert_eq!(progress.active_index(), None);
    }

    #[test]
    fn test_start_activates_first_step() {
        let mut progress = BuildProgress::initial();
        progress.start();
        assert_eq!(progress.active_index(), Some(0));
        assert_eq!(progress.current_step(), 0);
        assert!(progress.is_consistent());
    }

    #[test]
    fn test_walk_through_all_stages() {
        let mut progress = BuildProgress::initial();
        progress.start();
        let mut last_cursor = progress.current_step();
        for i in 0..progress.len() {
            assert!(progress.complete_stage(i));
            assert!(progress.is_consistent());
            assert!(progress.current_step() > last_cursor);
            last_cursor = progress.current_step();
        }
        assert!(progress.is_finished());
        assert_eq!(progress.active_index(), None);
        assert!(progress.steps().iter().all(|s| s.completed));
    }

    #[test]
    fn test_out_of_order_completion_is_ignored() {
        let mut progress = BuildProgress::initial();
        progress.start();
        assert!(!progress.complete_stage(2));
        assert_eq!(progress.current_step(), 0);
        assert!(progress.complete_stage(0));
        assert!(!progress.complete_stage(0));
        assert_eq!(progress.current_step(), 1);
    }

    #[test]
    fn test_reset_keeps_labels() {
        let table = TranslationTable::builtin();
        let mut progress = BuildProgress::localized(&table, "es");
        progress.start();
        progress.complete_stage(0);
        progress.reset();
        assert!(progress.is_reset());
        assert_eq!(progress.steps()[0].label, "Recopilando Datos");
    }
}
