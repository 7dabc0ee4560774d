use async_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::sync::Arc;

use super::preview::{self, Preview};
use crate::api::ImageGenerator;
use crate::config::Config;
use crate::core::locale::Texts;
use crate::core::{DataUri, Field, FormController, ImageParameters, ImagenError};
use crate::output::{self, Clipboard};

/// Outcome of one generation task, sent back to the UI loop
pub struct Outcome {
    pub result: Result<DataUri, ImagenError>,
    /// Decoded pixels, absent when the payload is not a readable image
    pub preview: Option<Preview>,
}

impl Outcome {
    /// Generate an image and decode its preview on the blocking pool
    pub async fn produce(generator: &dyn ImageGenerator, params: &ImageParameters) -> Self {
        let result = generator.generate(params).await;
        let preview = match &result {
            Ok(uri) => {
                let uri = uri.clone();
                match tokio::task::spawn_blocking(move || preview::decode(&uri)).await {
                    Ok(Ok(image)) => Some(Preview::new(image)),
                    Ok(Err(e)) => {
                        tracing::warn!("Cannot render preview: {}", e);
                        None
                    }
                    Err(e) => {
                        tracing::warn!("Preview decoding panicked: {}", e);
                        None
                    }
                }
            }
            Err(_) => None,
        };
        Self { result, preview }
    }
}

/// Focusable control on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    AspectRatio,
    Generate,
}

impl Focus {
    pub fn all() -> Vec<Focus> {
        Field::all()
            .iter()
            .copied()
            .map(Focus::Field)
            .chain([Focus::AspectRatio, Focus::Generate])
            .collect()
    }

    fn position(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Focus {
        let all = Self::all();
        all[(self.position() + 1) % all.len()]
    }

    pub fn previous(&self) -> Focus {
        let all = Self::all();
        all[(self.position() + all.len() - 1) % all.len()]
    }
}

/// TUI application state
pub struct App {
    /// Configuration
    pub config: Config,

    /// Form parameters and generation phase
    pub form: FormController,

    /// Focused control
    pub focus: Focus,

    /// Cursor position (in chars) within the focused field
    pub cursor_pos: usize,

    /// Status message
    pub status_message: Option<String>,

    /// Error message for the status bar
    pub error_message: Option<String>,

    /// Decoded image for the result pane
    pub preview: Option<Preview>,

    /// Files downloaded this session
    pub saved_paths: Vec<PathBuf>,

    /// Animation frame counter
    pub tick: usize,

    /// Whether to quit
    pub should_quit: bool,

    generator: Arc<dyn ImageGenerator>,
    results_tx: Sender<Outcome>,
    results_rx: Receiver<Outcome>,
}

impl App {
    pub fn new(config: Config, generator: Arc<dyn ImageGenerator>) -> Self {
        let (results_tx, results_rx) = async_channel::unbounded();
        Self {
            form: FormController::new(config.ui.language),
            config,
            focus: Focus::Field(Field::Subject),
            cursor_pos: 0,
            status_message: None,
            error_message: None,
            preview: None,
            saved_paths: Vec::new(),
            tick: 0,
            should_quit: false,
            generator,
            results_tx,
            results_rx,
        }
    }

    /// Interface text in the configured language
    pub fn texts(&self) -> &'static Texts {
        self.config.ui.language.texts()
    }

    /// Channel the generation tasks report on
    pub fn results(&self) -> Receiver<Outcome> {
        self.results_rx.clone()
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
        self.status_message = None;
    }

    /// Clear messages
    pub fn clear_messages(&mut self) {
        self.status_message = None;
        self.error_message = None;
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn focused_field(&self) -> Option<Field> {
        match self.focus {
            Focus::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.cursor_pos = self
            .focused_field()
            .map(|f| self.form.params().get(f).chars().count())
            .unwrap_or(0);
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn focus_previous(&mut self) {
        self.set_focus(self.focus.previous());
    }

    fn byte_offset(value: &str, char_pos: usize) -> usize {
        value
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let pos = self.cursor_pos;
        let value = self.form.field_mut(field);
        let offset = Self::byte_offset(value, pos);
        value.insert(offset, c);
        self.cursor_pos += 1;
    }

    pub fn delete_before_cursor(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if self.cursor_pos == 0 {
            return;
        }
        self.cursor_pos -= 1;
        let pos = self.cursor_pos;
        let value = self.form.field_mut(field);
        let offset = Self::byte_offset(value, pos);
        if offset < value.len() {
            value.remove(offset);
        }
    }

    pub fn delete_at_cursor(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let pos = self.cursor_pos;
        let value = self.form.field_mut(field);
        let offset = Self::byte_offset(value, pos);
        if offset < value.len() {
            value.remove(offset);
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let len = self.form.params().get(field).chars().count();
        self.cursor_pos = self.cursor_pos.saturating_add_signed(delta).min(len);
    }

    pub fn cursor_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn cursor_end(&mut self) {
        self.set_focus(self.focus);
    }

    /// Apply the n-th suggestion chip of the focused field
    pub fn apply_suggestion(&mut self, index: usize) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if let Some(value) = self.form.apply_suggestion(field, index) {
            self.cursor_pos = value.chars().count();
        }
    }

    /// Validate the form and dispatch one generation task
    pub fn submit(&mut self) {
        match self.form.submit() {
            Ok(params) => {
                tracing::info!(
                    "Generating with {} ({}): {}",
                    self.config.api.model,
                    params.aspect_ratio,
                    params.subject.trim()
                );
                tracing::debug!(
                    "Parameters: {}",
                    serde_json::to_string(&params).unwrap_or_default()
                );
                self.preview = None;
                self.set_status(self.texts().generating_status);

                let generator = Arc::clone(&self.generator);
                let tx = self.results_tx.clone();
                tokio::spawn(async move {
                    let outcome = Outcome::produce(generator.as_ref(), &params).await;
                    if tx.send(outcome).await.is_err() {
                        tracing::debug!("UI closed before generation finished");
                    }
                });
            }
            Err(ImagenError::Busy) => {}
            Err(e) => {
                tracing::debug!("Submit rejected: {}", e);
                self.clear_messages();
            }
        }
    }

    /// Fold a finished generation into the form state
    pub fn apply_outcome(&mut self, outcome: Outcome) {
        let Outcome { result, preview } = outcome;
        if !self.form.is_submitting() {
            self.form.resolve(result);
            return;
        }

        match &result {
            Ok(uri) => tracing::info!("Received {} image", uri.mime_type),
            Err(e) if e.is_local() => tracing::debug!("Generation failed: {}", e),
            Err(e) => tracing::warn!("Generation failed: {}", e),
        }

        let succeeded = result.is_ok();
        self.preview = preview;
        self.form.resolve(result);

        if succeeded {
            self.set_status(self.texts().image_generated);
        } else {
            self.clear_messages();
        }
    }

    /// Copy the compact prompt, only offered after a success
    pub fn copy_prompt(&mut self, clipboard: &mut dyn Clipboard) {
        if !self.form.show_prompt() {
            return;
        }
        let text = self.form.compact_prompt();
        match clipboard.copy(&text) {
            Ok(()) => self.set_status(self.texts().prompt_copied),
            Err(e) => self.set_error(format!("{}: {}", self.texts().copy_failed, e)),
        }
    }

    /// Save the current image into the output directory
    pub async fn download(&mut self) {
        let Some(uri) = self.form.image().cloned() else {
            return;
        };
        match output::save_image(&uri, &self.config.output.directory).await {
            Ok(path) => {
                self.set_status(format!("{} {}", self.texts().saved, path.display()));
                self.saved_paths.push(path);
            }
            Err(e) => self.set_error(format!("{}: {}", self.texts().download_failed, e)),
        }
    }
}
