use super::submit::{IdeaSink, PendingSubmission, SubmissionState};
use super::{Category, FieldErrors, IdeaDraft, ImplementationLevel};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Form inputs in tab order, ending with the submit button
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Title,
    Description,
    Category,
    Author,
    Email,
    Region,
    ImplementationLevel,
    Resources,
    ExpectedImpact,
    Submit,
}

impl FormField {
    pub const ORDER: [FormField; 10] = [
        FormField::Title,
        FormField::Description,
        FormField::Category,
        FormField::Author,
        FormField::Email,
        FormField::Region,
        FormField::ImplementationLevel,
        FormField::Resources,
        FormField::ExpectedImpact,
        FormField::Submit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Idea Title",
            FormField::Description => "Description",
            FormField::Category => "Category",
            FormField::Author => "Your Name",
            FormField::Email => "Email",
            FormField::Region => "Target Region (optional)",
            FormField::ImplementationLevel => "Implementation Level",
            FormField::Resources => "Resources Needed",
            FormField::ExpectedImpact => "Expected Impact",
            FormField::Submit => "Submit Idea",
        }
    }

    /// Map a validated struct field name back to its input
    pub fn from_name(name: &str) -> Option<FormField> {
        Some(match name {
            "title" => FormField::Title,
            "description" => FormField::Description,
            "category" => FormField::Category,
            "author" => FormField::Author,
            "email" => FormField::Email,
            "region" => FormField::Region,
            "implementation_level" => FormField::ImplementationLevel,
            "resources" => FormField::Resources,
            "expected_impact" => FormField::ExpectedImpact,
            _ => return None,
        })
    }

    /// Picked from a fixed list rather than typed
    pub fn is_choice(self) -> bool {
        matches!(self, FormField::Category | FormField::ImplementationLevel)
    }

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// Step through `options` from `current`, wrapping; `None` starts at an end
fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let len = options.len();
    if len == 0 {
        return None;
    }
    let next = match current.and_then(|c| options.iter().position(|o| *o == c)) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    Some(options[next])
}

/// Editable state of the contribution screen
pub struct ContributionForm {
    pub draft: IdeaDraft,
    region: String,
    pub focus: FormField,
    pub errors: FieldErrors,
    pub state: SubmissionState,
    /// After the first submit attempt, every edit re-validates
    attempted: bool,
    pending: Option<PendingSubmission>,
}

impl Default for ContributionForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContributionForm {
    pub fn new() -> Self {
        Self {
            draft: IdeaDraft::default(),
            region: String::new(),
            focus: FormField::Title,
            errors: FieldErrors::default(),
            state: SubmissionState::Idle,
            attempted: false,
            pending: None,
        }
    }

    pub fn focus_next(&mut self) {
        let i = self.focus.index();
        self.focus = FormField::ORDER[(i + 1) % FormField::ORDER.len()];
    }

    pub fn focus_prev(&mut self) {
        let len = FormField::ORDER.len();
        let i = self.focus.index();
        self.focus = FormField::ORDER[(i + len - 1) % len];
    }

    /// Current text of a typed field
    pub fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.draft.title,
            FormField::Description => &self.draft.description,
            FormField::Author => &self.draft.author,
            FormField::Email => &self.draft.email,
            FormField::Region => &self.region,
            FormField::Resources => &self.draft.resources,
            FormField::ExpectedImpact => &self.draft.expected_impact,
            FormField::Category => self.draft.category.map(Category::label).unwrap_or(""),
            FormField::ImplementationLevel => self
                .draft
                .implementation_level
                .map(ImplementationLevel::label)
                .unwrap_or(""),
            FormField::Submit => "",
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Title => Some(&mut self.draft.title),
            FormField::Description => Some(&mut self.draft.description),
            FormField::Author => Some(&mut self.draft.author),
            FormField::Email => Some(&mut self.draft.email),
            FormField::Region => Some(&mut self.region),
            FormField::Resources => Some(&mut self.draft.resources),
            FormField::ExpectedImpact => Some(&mut self.draft.expected_impact),
            FormField::Category | FormField::ImplementationLevel | FormField::Submit => None,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.state, SubmissionState::Idle | SubmissionState::Failed(_))
    }

    pub fn input_char(&mut self, c: char) {
        if !self.is_editable() {
            return;
        }
        if let Some(text) = self.text_mut(self.focus) {
            text.push(c);
            self.after_edit();
        }
    }

    pub fn backspace(&mut self) {
        if !self.is_editable() {
            return;
        }
        if let Some(text) = self.text_mut(self.focus) {
            text.pop();
            self.after_edit();
        }
    }

    /// Change the focused choice field
    pub fn cycle_choice(&mut self, forward: bool) {
        if !self.is_editable() {
            return;
        }
        match self.focus {
            FormField::Category => {
                self.draft.category = cycle(&Category::ALL, self.draft.category, forward);
            }
            FormField::ImplementationLevel => {
                self.draft.implementation_level =
                    cycle(&ImplementationLevel::ALL, self.draft.implementation_level, forward);
            }
            _ => return,
        }
        self.after_edit();
    }

    fn after_edit(&mut self) {
        self.draft.region = Some(self.region.clone());
        if self.attempted {
            self.errors = match self.draft.finalize() {
                Ok(_) => FieldErrors::default(),
                Err(errors) => errors,
            };
        }
    }

    /// Validate and, if clean, hand the idea to `sink` on a worker thread.
    /// Returns false when validation failed or a submission is in flight.
    pub fn submit(&mut self, sink: Arc<dyn IdeaSink>) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.attempted = true;
        self.draft.region = Some(self.region.clone());
        match self.draft.finalize() {
            Ok(submission) => {
                self.errors = FieldErrors::default();
                info!(
                    title = %submission.title,
                    category = ?submission.category,
                    "Submitting idea"
                );
                self.pending = Some(PendingSubmission::spawn(sink, submission));
                self.state = SubmissionState::Submitting { since: Instant::now() };
                true
            }
            Err(errors) => {
                debug!(fields = errors.len(), "Idea failed validation");
                // Jump to the first offending input
                if let Some(first) = errors.fields().next() {
                    self.focus = first;
                }
                self.errors = errors;
                false
            }
        }
    }

    /// Pick up a finished submission, if any
    pub fn poll(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        if let Some(result) = pending.try_finish() {
            self.pending = None;
            self.state = match result {
                Ok(idea) => {
                    info!(id = %idea.id, "Idea submitted");
                    SubmissionState::Succeeded(idea)
                }
                Err(e) => SubmissionState::Failed(e.to_string()),
            };
        }
    }

    /// Start over with an empty form
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contribute::fixtures::valid_draft;
    use crate::contribute::SimulatedSink;
    use std::time::Duration;

    fn type_str(form: &mut ContributionForm, s: &str) {
        for c in s.chars() {
            form.input_char(c);
        }
    }

    fn filled_form() -> ContributionForm {
        let draft = valid_draft();
        let mut form = ContributionForm::new();
        for (field, text) in [
            (FormField::Title, draft.title.as_str()),
            (FormField::Description, draft.description.as_str()),
            (FormField::Author, draft.author.as_str()),
            (FormField::Email, draft.email.as_str()),
            (FormField::Resources, draft.resources.as_str()),
            (FormField::ExpectedImpact, draft.expected_impact.as_str()),
        ] {
            form.focus = field;
            type_str(&mut form, text);
        }
        form.focus = FormField::Category;
        form.cycle_choice(true);
        form.focus = FormField::ImplementationLevel;
        form.cycle_choice(false);
        form
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = ContributionForm::new();
        form.focus_prev();
        assert_eq!(form.focus, FormField::Submit);
        form.focus_next();
        assert_eq!(form.focus, FormField::Title);
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut form = ContributionForm::new();
        type_str(&mut form, "Peace");
        form.backspace();
        assert_eq!(form.text(FormField::Title), "Peac");
        // Choice fields ignore typing
        form.focus = FormField::Category;
        form.input_char('x');
        assert_eq!(form.draft.category, None);
    }

    #[test]
    fn test_choice_cycles_both_ways() {
        assert_eq!(cycle(&Category::ALL, None, true), Some(Category::Policy));
        assert_eq!(cycle(&Category::ALL, None, false), Some(Category::Economic));
        assert_eq!(cycle(&Category::ALL, Some(Category::Economic), true), Some(Category::Policy));
    }

    #[test]
    fn test_invalid_submit_sets_errors_and_focus() {
        let mut form = ContributionForm::new();
        form.focus = FormField::Submit;
        let sink: Arc<dyn IdeaSink> = Arc::new(SimulatedSink::new(Duration::ZERO));
        assert!(!form.submit(sink));
        assert_eq!(form.focus, FormField::Title);
        assert!(form.errors.get(FormField::Email).is_some());
        assert_eq!(form.state, SubmissionState::Idle);

        // Errors clear as fields become valid
        type_str(&mut form, "Long enough title");
        assert!(form.errors.get(FormField::Title).is_none());
    }

    #[test]
    fn test_valid_submit_completes() {
        let mut form = filled_form();
        assert_eq!(form.draft.implementation_level, Some(ImplementationLevel::Global));
        let sink: Arc<dyn IdeaSink> = Arc::new(SimulatedSink::new(Duration::ZERO));
        assert!(form.submit(sink));
        assert!(matches!(form.state, SubmissionState::Submitting { .. }));
        assert!(!form.is_editable());

        let deadline = Instant::now() + Duration::from_secs(5);
        while matches!(form.state, SubmissionState::Submitting { .. })
            && Instant::now() < deadline
        {
            std::thread::sleep(Duration::from_millis(5));
            form.poll();
        }
        match &form.state {
            SubmissionState::Succeeded(idea) => {
                assert_eq!(idea.idea.category, Category::Policy);
                assert_eq!(idea.status, crate::contribute::ReviewStatus::Pending);
            }
            other => panic!("unexpected state {other:?}"),
        }

        form.reset();
        assert_eq!(form.state, SubmissionState::Idle);
        assert_eq!(form.text(FormField::Title), "");
    }
}
