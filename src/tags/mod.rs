//! Free-text tag resolution: comparison keys, languages, quality and hashtags

mod hashtags;
mod language;
mod normalize;
mod quality;

pub use hashtags::create_hashtags;
pub use language::LanguageTable;
pub use normalize::normalize;
pub use quality::QualityTable;
