pub mod error;
pub mod form;
pub mod locale;
pub mod params;
pub mod prompt;

pub use error::ImagenError;
pub use form::{FormController, Phase};
pub use locale::Language;
pub use params::{AspectRatio, DataUri, Field, ImageParameters};
