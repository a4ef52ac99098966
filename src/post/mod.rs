//! Post assembly and rendering

mod assemble;
pub mod format;
mod record;
pub mod template;

use serde::Serialize;

pub use assemble::{assemble, AssemblySettings, FileFacts};
pub use record::{PostRecord, PLACEHOLDERS};
pub use template::{TemplateSet, TemplateVariant};

/// Final pipeline output
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub record: PostRecord,
    pub variant: TemplateVariant,
    pub text: String,
}
