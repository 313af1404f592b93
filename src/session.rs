// 🧮 Session Controller
// Owns the form, the current outcome and the history for one user session

use crate::engine::{compute_bmi, BmiResult, InputForm};
use crate::error::BmiError;
use crate::history::{HistoryEntry, HistoryLog};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    ValidationError(BmiError),
    ResultShown(BmiResult),
}

impl SessionState {
    pub fn name(&self) -> &str {
        match self {
            SessionState::Idle => "Idle",
            SessionState::ValidationError(_) => "ValidationError",
            SessionState::ResultShown(_) => "ResultShown",
        }
    }
}

pub struct Session {
    id: Uuid,
    pub form: InputForm,
    state: SessionState,
    // outlives a later validation error, only clear_inputs drops it
    last_result: Option<BmiResult>,
    history: HistoryLog,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            id: Uuid::new_v4(),
            form: InputForm::default(),
            state: SessionState::Idle,
            last_result: None,
            history: HistoryLog::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Last successful result, still shown alongside a later error
    pub fn result(&self) -> Option<&BmiResult> {
        self.last_result.as_ref()
    }

    /// Message to show under the form, if the last calculate failed
    pub fn error_message(&self) -> Option<String> {
        match &self.state {
            SessionState::ValidationError(err) => Some(err.to_string()),
            _ => None,
        }
    }

    /// Validate, compute, then append to history.
    ///
    /// On failure only the error is recorded: the previous result stays on
    /// screen and the history is left untouched.
    pub fn calculate(&mut self) -> Result<&HistoryEntry, BmiError> {
        let outcome = self
            .form
            .validate()
            .and_then(|input| compute_bmi(&input).map(|result| (input, result)));

        match outcome {
            Ok((input, result)) => {
                self.state = SessionState::ResultShown(result);
                self.last_result = Some(result);
                let entry = self.history.push(&input, &result);
                info!(
                    session = %self.id,
                    entry = %entry.id,
                    bmi = %entry.bmi,
                    category = %entry.category,
                    "bmi calculated"
                );
                Ok(entry)
            }
            Err(err) => {
                debug!(session = %self.id, error = ?err, "calculation rejected");
                self.state = SessionState::ValidationError(err.clone());
                Err(err)
            }
        }
    }

    /// Empty the form and drop the result or error. History is kept.
    pub fn clear_inputs(&mut self) {
        self.form.clear();
        self.state = SessionState::Idle;
        self.last_result = None;
        debug!(session = %self.id, "inputs cleared");
    }

    /// Empty the history. The result or error on screen is kept.
    pub fn clear_history(&mut self) {
        let dropped = self.history.len();
        self.history.clear();
        info!(session = %self.id, dropped, "history cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Category;

    fn session_with(age: &str, feet: &str, inches: &str, weight: &str) -> Session {
        let mut session = Session::new();
        session.form = InputForm::new(age, feet, inches, weight);
        session
    }

    #[test]
    fn test_successful_calculation() {
        let mut session = session_with("30", "5", "7", "70");
        let entry = session.calculate().unwrap();
        assert_eq!(entry.bmi, "24.17");

        assert_eq!(session.state().name(), "ResultShown");
        let result = session.result().unwrap();
        assert_eq!(result.category, Category::NormalWeight);
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().last().unwrap().category, result.category);
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_invalid_input_never_appends() {
        let mut session = session_with("", "5", "7", "70");
        assert_eq!(session.calculate().unwrap_err(), BmiError::MissingField);
        assert_eq!(
            session.error_message().as_deref(),
            Some("Please enter age, height, and weight.")
        );

        session.form.age = "thirty".to_string();
        assert!(matches!(
            session.calculate(),
            Err(BmiError::InvalidNumber { field: "age" })
        ));

        session.form = InputForm::new("30", "0", "0", "70");
        assert_eq!(session.calculate().unwrap_err(), BmiError::ZeroHeight);

        session.form = InputForm::new("30", "0", "1", "1e308");
        assert_eq!(session.calculate().unwrap_err(), BmiError::OutOfRange);

        assert!(session.history().is_empty());
    }

    #[test]
    fn test_huge_height_does_not_panic() {
        let mut session = session_with("30", "200000000", "0", "70");
        let entry = session.calculate().unwrap();
        assert_eq!(entry.bmi, "0.00");
        assert_eq!(entry.height, "200000000'0\"");
    }

    #[test]
    fn test_error_keeps_previous_result() {
        let mut session = session_with("30", "5", "7", "70");
        session.calculate().unwrap();

        session.form.age.clear();
        assert_eq!(session.calculate().unwrap_err(), BmiError::MissingField);
        assert_eq!(session.state().name(), "ValidationError");
        assert_eq!(session.result().map(|r| r.bmi_display()).as_deref(), Some("24.17"));
        assert_eq!(
            session.error_message().as_deref(),
            Some("Please enter age, height, and weight.")
        );
        assert_eq!(session.history().len(), 1);

        session.form.age = "30".to_string();
        session.form.weight_kg = "80".to_string();
        session.calculate().unwrap();
        assert!(session.error_message().is_none());
        assert_eq!(session.result().unwrap().bmi_display(), "27.62");
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_clear_inputs_keeps_history() {
        let mut session = session_with("30", "5", "7", "70");
        session.calculate().unwrap();

        session.clear_inputs();
        assert_eq!(session.form, InputForm::default());
        assert_eq!(session.state(), &SessionState::Idle);
        assert!(session.result().is_none());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_clear_history_keeps_result() {
        let mut session = session_with("30", "5", "7", "70");
        session.calculate().unwrap();
        session.calculate().unwrap();

        session.clear_history();
        assert!(session.history().is_empty());
        assert!(session.result().is_some());

        session.clear_history();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = session_with("30", "5", "7", "70");
        let b = Session::new();
        a.calculate().unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(a.history().len(), 1);
        assert!(b.history().is_empty());
    }
}
