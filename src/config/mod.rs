pub mod form;
pub mod loader;
pub mod types;

pub use form::{visible_fields, FormField, InputType, VisibleWhen, SETTINGS_FORM};
pub use loader::Config;
pub use types::*;
