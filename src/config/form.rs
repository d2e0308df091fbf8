//! Declarative description of the settings form.
//!
//! The host renders the form; this table only says which fields exist and when
//! they are shown.

use super::types::RemuxSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    Checkbox,
    Textarea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibleWhen {
    Always,
    /// Shown only while the named boolean setting is on.
    Enabled(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub input_type: InputType,
    pub visible_when: VisibleWhen,
}

pub const SETTINGS_FORM: &[FormField] = &[
    FormField {
        key: "audio_codecs",
        label: "Comma separated list of audio codecs",
        input_type: InputType::Text,
        visible_when: VisibleWhen::Always,
    },
    FormField {
        key: "input_file_ext",
        label: "Input file extensions to test",
        input_type: InputType::Text,
        visible_when: VisibleWhen::Always,
    },
    FormField {
        key: "output_ext",
        label: "Output container extension",
        input_type: InputType::Text,
        visible_when: VisibleWhen::Always,
    },
    FormField {
        key: "advanced",
        label: "Write your own FFmpeg params",
        input_type: InputType::Checkbox,
        visible_when: VisibleWhen::Always,
    },
    FormField {
        key: "main_options",
        label: "Write your own main options",
        input_type: InputType::Textarea,
        visible_when: VisibleWhen::Enabled("advanced"),
    },
    FormField {
        key: "advanced_options",
        label: "Write your own advanced options",
        input_type: InputType::Textarea,
        visible_when: VisibleWhen::Enabled("advanced"),
    },
];

impl FormField {
    pub fn is_visible(&self, settings: &RemuxSettings) -> bool {
        match self.visible_when {
            VisibleWhen::Always => true,
            VisibleWhen::Enabled(key) => settings.flag(key),
        }
    }
}

pub fn visible_fields(settings: &RemuxSettings) -> Vec<&'static FormField> {
    SETTINGS_FORM
        .iter()
        .filter(|field| field.is_visible(settings))
        .collect()
}
