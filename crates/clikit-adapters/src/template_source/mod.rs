//! Template source adapters implementing the `TemplateSource` port.

mod directory;
mod embedded;

pub use directory::DirectoryTemplate;
pub use embedded::EmbeddedTemplate;
