// Text Normalizer: cleaning, section extraction, and document text
// acquisition from uploaded PDF / TXT files.

pub mod document;
pub mod extract;
pub mod handlers;
pub mod normalizer;
pub mod sections;

pub use document::Document;
pub use normalizer::TextNormalizer;
pub use sections::SectionMap;
