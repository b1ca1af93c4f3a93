/// Format module - texture formats and upload format resolution

pub mod texture_format;
pub mod format_resolver;

pub use texture_format::*;
pub use format_resolver::*;
