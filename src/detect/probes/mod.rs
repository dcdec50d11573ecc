//! Built-in detection probes.
//!
//! This module contains the default probes used by the format detector:
//!
//! - `ExtensionProbe`: Case-insensitive lookup of known file extensions
//! - `ContentProbe`: Prefix sniffing (markup, signatures, delimiters)

mod content;
mod extension;

pub use content::ContentProbe;
pub use extension::ExtensionProbe;
