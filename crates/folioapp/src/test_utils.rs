use crate::form::FormView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCall {
    Valid(String),
    Invalid(String, String),
    Focus(String),
    DisableSubmit,
}

/// A [`FormView`] that remembers every call, in order.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
}

impl RecordingView {
    pub fn focused(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ViewCall::Focus(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn disable_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ViewCall::DisableSubmit))
            .count()
    }
}

impl FormView for RecordingView {
    fn mark_valid(&mut self, field: &str) {
        self.calls.push(ViewCall::Valid(field.to_string()));
    }

    fn mark_invalid(&mut self, field: &str, message: &str) {
        self.calls
            .push(ViewCall::Invalid(field.to_string(), message.to_string()));
    }

    fn focus(&mut self, field: &str) {
        self.calls.push(ViewCall::Focus(field.to_string()));
    }

    fn disable_submit(&mut self) {
        self.calls.push(ViewCall::DisableSubmit);
    }
}
