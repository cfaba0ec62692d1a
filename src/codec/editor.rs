use super::{FromJsonText, to_pretty_json};
use crate::config::EditorConfig;
use crate::error::CodecError;
use serde::Serialize;

/// Which view of a `DualModeEditor` the user is working in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Builder,
    RawJson,
}

/// A structured value and its raw JSON text, kept as two separate views.
///
/// The views never update each other implicitly. `sync_to_text` copies the
/// builder value into the text; `load_text` replaces the builder value with
/// the parsed text, or fails and leaves it untouched.
#[derive(Debug, Clone)]
pub struct DualModeEditor<T> {
    value: T,
    text: String,
    mode: EditorMode,
    config: EditorConfig,
}

impl<T: Serialize + FromJsonText> DualModeEditor<T> {
    pub fn new(value: T, config: EditorConfig) -> Result<Self, CodecError> {
        let text = to_pretty_json(&value)?;
        Ok(Self {
            value,
            text,
            mode: EditorMode::Builder,
            config,
        })
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Overwrites the text with the pretty-printed builder value.
    pub fn sync_to_text(&mut self) -> Result<(), CodecError> {
        self.text = to_pretty_json(&self.value)?;
        Ok(())
    }

    /// Replaces the builder value with the parsed text. On failure nothing changes.
    pub fn load_text(&mut self) -> Result<(), CodecError> {
        self.value = T::from_json_text_with(&self.text, &self.config)?;
        Ok(())
    }

    /// Enters raw-JSON mode, seeding the text from the builder value.
    pub fn switch_to_raw(&mut self) -> Result<(), CodecError> {
        self.sync_to_text()?;
        self.mode = EditorMode::RawJson;
        Ok(())
    }

    /// Returns to builder mode. Fails, staying in raw mode, if the text is invalid.
    pub fn switch_to_builder(&mut self) -> Result<(), CodecError> {
        self.load_text()?;
        self.mode = EditorMode::Builder;
        Ok(())
    }
}
