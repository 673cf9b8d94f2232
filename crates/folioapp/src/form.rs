//! # Form Events
//!
//! [`FormController`] turns the three events a form cares about into field
//! state changes, and reports those changes through a [`FormView`] instead of
//! touching any UI directly. A browser binding implements `FormView` on top of
//! the DOM; tests implement it with a recorder.
//!
//! ## When Fields Are Validated
//!
//! | Event | Which fields | Why |
//! |-------|--------------|-----|
//! | blur | the blurred field | first validation happens when the user leaves a field |
//! | input | the edited field, **only if already invalid** | errors clear as soon as they are fixed, but no error appears mid-typing |
//! | submit | every field | nothing is sent while anything fails |
//!
//! A field never shows more than one message: marking a field replaces
//! whatever message it had.
//!
//! ## Submitting
//!
//! A failing submit is cancelled and focus moves to the first invalid field in
//! document order. A passing submit disables the submit control and locks the
//! controller; further submits are ignored until [`FormController::reset_submit`].

use crate::error::Result;
use crate::model::{Field, Form, Validity};
use crate::validation::{check_form, validate, FieldFailure, ValidationError};

/// Output port for everything the form wants the UI to reflect.
pub trait FormView {
    fn mark_valid(&mut self, field: &str);
    fn mark_invalid(&mut self, field: &str, message: &str);
    fn focus(&mut self, field: &str);
    fn disable_submit(&mut self);
}

/// What an input event did besides storing the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputOutcome {
    /// Set when the field was invalid and got re-checked.
    pub revalidated: Option<std::result::Result<(), ValidationError>>,
    /// True when the form autosaves and a draft save should be scheduled.
    pub autosave: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// All fields passed; the submission goes ahead.
    Proceed,
    /// Default action suppressed. `failures` is in document order.
    Cancelled { failures: Vec<FieldFailure> },
    /// A submission is already in flight.
    Ignored,
}

impl SubmitOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SubmitOutcome::Cancelled { .. })
    }
}

pub struct FormController {
    form: Form,
    submitting: bool,
}

impl FormController {
    pub fn new(form: Form) -> Self {
        Self {
            form,
            submitting: false,
        }
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    pub fn id(&self) -> &str {
        &self.form.id
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Unlocks the form after the host finished (or abandoned) a submission.
    pub fn reset_submit(&mut self) {
        self.submitting = false;
    }

    pub fn on_field_blur<V: FormView>(
        &mut self,
        name: &str,
        view: &mut V,
    ) -> Result<std::result::Result<(), ValidationError>> {
        let field = self.form.require_field_mut(name)?;
        Ok(apply_verdict(field, view))
    }

    pub fn on_field_input<V: FormView>(
        &mut self,
        name: &str,
        value: &str,
        view: &mut V,
    ) -> Result<InputOutcome> {
        let autosave = self.form.autosave;
        let field = self.form.require_field_mut(name)?;
        field.value = value.to_string();

        let revalidated = if field.is_invalid() {
            Some(apply_verdict(field, view))
        } else {
            None
        };

        Ok(InputOutcome {
            revalidated,
            autosave,
        })
    }

    pub fn on_form_submit<V: FormView>(&mut self, view: &mut V) -> SubmitOutcome {
        if self.submitting {
            return SubmitOutcome::Ignored;
        }

        let check = check_form(&self.form.fields);
        for field in self.form.fields.iter_mut() {
            apply_verdict(field, view);
        }

        if let Some(first) = check.first_invalid() {
            view.focus(first);
            return SubmitOutcome::Cancelled {
                failures: check.failures,
            };
        }

        self.submitting = true;
        view.disable_submit();
        SubmitOutcome::Proceed
    }
}

/// Validates `field`, records the result on it and mirrors it to the view.
fn apply_verdict<V: FormView>(
    field: &mut Field,
    view: &mut V,
) -> std::result::Result<(), ValidationError> {
    match validate(field) {
        Ok(_) => {
            field.validity = Validity::Valid;
            field.error = None;
            view.mark_valid(&field.name);
            Ok(())
        }
        Err(error) => {
            let message = error.to_string();
            field.validity = Validity::Invalid;
            view.mark_invalid(&field.name, &message);
            field.error = Some(message);
            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FolioError;
    use crate::model::Field;
    use crate::test_utils::{RecordingView, ViewCall};

    fn contact_form(name: &str, email: &str) -> FormController {
        FormController::new(
            Form::new("contact")
                .with_field(Field::text("name").required().with_value(name))
                .with_field(Field::email("email").required().with_value(email)),
        )
    }

    #[test]
    fn blur_validates_the_field() {
        let mut ctrl = contact_form("", "a@b.com");
        let mut view = RecordingView::default();

        let verdict = ctrl.on_field_blur("name", &mut view).unwrap();
        assert_eq!(verdict, Err(ValidationError::RequiredFieldEmpty));

        let field = ctrl.form().field("name").unwrap();
        assert_eq!(field.validity, Validity::Invalid);
        assert_eq!(field.error.as_deref(), Some("This field is required."));
        assert_eq!(
            view.calls,
            vec![ViewCall::Invalid(
                "name".into(),
                "This field is required.".into()
            )]
        );
    }

    #[test]
    fn input_on_untouched_field_does_not_validate() {
        let mut ctrl = contact_form("", "");
        let mut view = RecordingView::default();

        let outcome = ctrl.on_field_input("email", "not-yet", &mut view).unwrap();
        assert_eq!(outcome.revalidated, None);
        assert!(view.calls.is_empty());
        assert_eq!(ctrl.form().value("email"), Some("not-yet"));
        assert_eq!(
            ctrl.form().field("email").unwrap().validity,
            Validity::Unvalidated
        );
    }

    #[test]
    fn input_on_valid_field_does_not_flash_errors() {
        let mut ctrl = contact_form("Ana", "a@b.com");
        let mut view = RecordingView::default();
        ctrl.on_field_blur("email", &mut view).unwrap();
        view.calls.clear();

        let outcome = ctrl.on_field_input("email", "a@", &mut view).unwrap();
        assert_eq!(outcome.revalidated, None);
        assert!(view.calls.is_empty());
    }

    #[test]
    fn input_on_invalid_field_revalidates_live() {
        let mut ctrl = contact_form("Ana", "bad");
        let mut view = RecordingView::default();
        ctrl.on_field_blur("email", &mut view).unwrap();

        let still_bad = ctrl.on_field_input("email", "a@b", &mut view).unwrap();
        assert_eq!(
            still_bad.revalidated,
            Some(Err(ValidationError::InvalidEmailFormat))
        );

        let fixed = ctrl.on_field_input("email", "a@b.com", &mut view).unwrap();
        assert_eq!(fixed.revalidated, Some(Ok(())));
        let field = ctrl.form().field("email").unwrap();
        assert_eq!(field.validity, Validity::Valid);
        assert!(field.error.is_none());
        assert_eq!(view.calls.last(), Some(&ViewCall::Valid("email".into())));
    }

    #[test]
    fn input_reports_autosave_flag() {
        let mut ctrl = FormController::new(
            Form::new("project")
                .with_autosave()
                .with_field(Field::text("title")),
        );
        let mut view = RecordingView::default();
        assert!(ctrl.on_field_input("title", "x", &mut view).unwrap().autosave);

        let mut plain = contact_form("", "");
        assert!(!plain.on_field_input("name", "x", &mut view).unwrap().autosave);
    }

    #[test]
    fn unknown_field_is_an_error() {
        let mut ctrl = contact_form("", "");
        let mut view = RecordingView::default();
        assert!(matches!(
            ctrl.on_field_blur("phone", &mut view),
            Err(FolioError::FieldNotFound { .. })
        ));
    }

    #[test]
    fn submit_with_two_bad_fields_is_cancelled() {
        let mut ctrl = contact_form("", "bad");
        let mut view = RecordingView::default();

        let outcome = ctrl.on_form_submit(&mut view);
        let SubmitOutcome::Cancelled { failures } = outcome else {
            panic!("expected cancelled submit, got {:?}", outcome);
        };
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].name, "name");
        assert_eq!(failures[0].error, ValidationError::RequiredFieldEmpty);
        assert_eq!(failures[1].name, "email");
        assert_eq!(failures[1].error, ValidationError::InvalidEmailFormat);

        assert_eq!(view.focused(), vec!["name"]);
        assert_eq!(view.disable_count(), 0);
        assert!(!ctrl.is_submitting());
    }

    #[test]
    fn focus_goes_to_first_invalid_in_document_order() {
        let mut ctrl = contact_form("Ana", "bad");
        let mut view = RecordingView::default();
        ctrl.on_form_submit(&mut view);
        assert_eq!(view.focused(), vec!["email"]);
    }

    #[test]
    fn clean_submit_disables_button_once() {
        let mut ctrl = FormController::new(
            Form::new("newsletter").with_field(Field::email("email").required().with_value("a@b.com")),
        );
        let mut view = RecordingView::default();

        assert_eq!(ctrl.on_form_submit(&mut view), SubmitOutcome::Proceed);
        assert_eq!(ctrl.on_form_submit(&mut view), SubmitOutcome::Ignored);

        assert_eq!(view.disable_count(), 1);
        assert!(view.focused().is_empty());
        assert!(ctrl.is_submitting());

        ctrl.reset_submit();
        assert_eq!(ctrl.on_form_submit(&mut view), SubmitOutcome::Proceed);
        assert_eq!(view.disable_count(), 2);
    }

    #[test]
    fn resubmit_after_fix_clears_messages() {
        let mut ctrl = contact_form("", "a@b.com");
        let mut view = RecordingView::default();
        assert!(ctrl.on_form_submit(&mut view).is_cancelled());

        ctrl.on_field_input("name", "Ana", &mut view).unwrap();
        assert_eq!(ctrl.on_form_submit(&mut view), SubmitOutcome::Proceed);
        assert!(ctrl.form().fields.iter().all(|f| f.error.is_none()));
    }
}
