use super::error::ImagenError;
use super::locale::Language;
use super::params::{AspectRatio, DataUri, Field, ImageParameters};
use super::prompt;

/// Where the current generation cycle stands
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing generated yet
    #[default]
    Idle,
    /// A request is in flight
    Submitting,
    /// The last request produced an image
    Succeeded(DataUri),
    /// The last request failed
    Failed(String),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Submitting => "submitting",
            Phase::Succeeded(_) => "succeeded",
            Phase::Failed(_) => "failed",
        }
    }
}

/// Owns the form parameters and the state derived from them.
///
/// The controller never performs I/O. `submit` hands back a snapshot of the
/// parameters for the caller to dispatch, and `resolve` consumes the outcome.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    language: Language,
    params: ImageParameters,
    phase: Phase,
    validation_error: Option<String>,
    show_prompt: bool,
}

impl FormController {
    /// An empty form whose messages are in `language`
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Default::default()
        }
    }

    pub fn params(&self) -> &ImageParameters {
        &self.params
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    pub fn show_prompt(&self) -> bool {
        self.show_prompt && !self.is_submitting()
    }

    /// Image from the last successful generation
    pub fn image(&self) -> Option<&DataUri> {
        match &self.phase {
            Phase::Succeeded(uri) => Some(uri),
            _ => None,
        }
    }

    /// Message for the error panel, validation first
    pub fn error(&self) -> Option<&str> {
        if let Some(msg) = &self.validation_error {
            return Some(msg);
        }
        match &self.phase {
            Phase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// The copyable prompt for the current parameters
    pub fn compact_prompt(&self) -> String {
        prompt::compact_prompt(&self.params)
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.params.set(field, value);
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        self.params.get_mut(field)
    }

    /// Overwrite a field with one of its suggestion chips
    pub fn apply_suggestion(&mut self, field: Field, index: usize) -> Option<&'static str> {
        let suggestion = field.suggestions().get(index).copied()?;
        self.set_field(field, suggestion);
        Some(suggestion)
    }

    pub fn set_aspect_ratio(&mut self, ar: AspectRatio) {
        self.params.aspect_ratio = ar;
    }

    pub fn cycle_aspect_ratio(&mut self, forward: bool) {
        let ar = self.params.aspect_ratio;
        self.params.aspect_ratio = if forward { ar.next() } else { ar.previous() };
    }

    /// Start a generation cycle.
    ///
    /// Returns the parameter snapshot to send. On a validation failure nothing
    /// should be dispatched and the message is available from [`Self::error`].
    pub fn submit(&mut self) -> Result<ImageParameters, ImagenError> {
        if self.is_submitting() {
            return Err(ImagenError::Busy);
        }

        self.show_prompt = false;

        if !self.params.has_subject() {
            let message = self.language.texts().subject_required;
            self.phase = Phase::Idle;
            self.validation_error = Some(message.to_string());
            return Err(ImagenError::Validation(message.to_string()));
        }

        self.validation_error = None;
        self.phase = Phase::Submitting;
        Ok(self.params.clone())
    }

    /// Record the outcome of the in-flight request
    pub fn resolve(&mut self, outcome: Result<DataUri, ImagenError>) {
        if !self.is_submitting() {
            tracing::warn!(
                "Ignoring generation result while {}",
                self.phase.name()
            );
            return;
        }

        match outcome {
            Ok(uri) => {
                self.phase = Phase::Succeeded(uri);
                self.show_prompt = true;
            }
            Err(e) => {
                self.phase = Phase::Failed(e.to_string());
                self.show_prompt = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBJECT_REQUIRED: &str = "Please fill in the 'Main Subject' field first.";

    fn submitted(subject: &str) -> FormController {
        let mut form = FormController::default();
        form.set_field(Field::Subject, subject);
        form.submit().unwrap();
        form
    }

    #[test]
    fn test_empty_subject_stays_idle() {
        let mut form = FormController::default();
        let err = form.submit().unwrap_err();

        assert!(matches!(err, ImagenError::Validation(_)));
        assert_eq!(form.phase(), &Phase::Idle);
        assert_eq!(form.error(), Some(SUBJECT_REQUIRED));
        assert!(form.image().is_none());
    }

    #[test]
    fn test_validation_message_follows_language() {
        let mut form = FormController::new(Language::Indonesian);
        assert!(form.submit().is_err());
        assert_eq!(form.error(), Some("Mohon isi 'Subjek Utama' terlebih dahulu."));
    }

    #[test]
    fn test_submit_returns_snapshot() {
        let mut form = FormController::default();
        form.set_field(Field::Subject, "a lighthouse");
        form.set_aspect_ratio(AspectRatio::Portrait);

        let snapshot = form.submit().unwrap();
        assert_eq!(snapshot.subject, "a lighthouse");
        assert_eq!(snapshot.aspect_ratio, AspectRatio::Portrait);
        assert!(form.is_submitting());
        assert!(form.error().is_none());
    }

    #[test]
    fn test_success_stores_image_and_shows_prompt() {
        let mut form = submitted("a red fox");
        form.resolve(Ok(DataUri::png("UDA=")));

        assert_eq!(form.phase(), &Phase::Succeeded(DataUri::png("UDA=")));
        assert_eq!(form.image().unwrap().to_string(), "data:image/png;base64,UDA=");
        assert!(form.error().is_none());
        assert!(form.show_prompt());
    }

    #[test]
    fn test_failure_stores_message() {
        let mut form = submitted("a red fox");
        form.resolve(Err(ImagenError::Service {
            message: "boom".to_string(),
            source: None,
        }));

        assert_eq!(form.phase(), &Phase::Failed("boom".to_string()));
        assert_eq!(form.error(), Some("boom"));
        assert!(form.image().is_none());
        assert!(!form.show_prompt());
    }

    #[test]
    fn test_resubmit_clears_previous_result() {
        let mut form = submitted("a red fox");
        form.resolve(Ok(DataUri::png("UDA=")));

        form.submit().unwrap();
        assert!(form.image().is_none());
        assert!(form.error().is_none());
        assert!(!form.show_prompt());
    }

    #[test]
    fn test_resubmit_after_failure_clears_error() {
        let mut form = submitted("a red fox");
        form.resolve(Err(ImagenError::Refused("nope".into())));

        form.submit().unwrap();
        assert!(form.error().is_none());
        assert!(form.is_submitting());
    }

    #[test]
    fn test_validation_after_success_drops_stale_image() {
        let mut form = submitted("a red fox");
        form.resolve(Ok(DataUri::png("UDA=")));
        form.set_field(Field::Subject, "");

        assert!(form.submit().is_err());
        assert!(form.image().is_none());
        assert_eq!(form.error(), Some(SUBJECT_REQUIRED));
    }

    #[test]
    fn test_second_submit_while_in_flight_is_busy() {
        let mut form = submitted("a red fox");
        assert!(matches!(form.submit(), Err(ImagenError::Busy)));
        assert!(form.is_submitting());
    }

    #[test]
    fn test_late_resolve_is_ignored() {
        let mut form = FormController::default();
        form.resolve(Ok(DataUri::png("UDA=")));
        assert_eq!(form.phase(), &Phase::Idle);
    }

    #[test]
    fn test_suggestion_overwrites_field() {
        let mut form = FormController::default();
        form.set_field(Field::Style, "water");
        assert_eq!(form.apply_suggestion(Field::Style, 1), Some("Anime"));
        assert_eq!(form.params().style, "Anime");
        assert_eq!(form.apply_suggestion(Field::Subject, 0), None);
    }

    #[test]
    fn test_edits_allowed_while_submitting() {
        let mut form = submitted("a red fox");
        form.set_field(Field::Colors, "Pastel");
        form.cycle_aspect_ratio(true);
        assert_eq!(form.params().colors, "Pastel");
        assert_eq!(form.params().aspect_ratio, AspectRatio::Landscape);
        assert!(form.is_submitting());
    }
}
