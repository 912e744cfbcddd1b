mod surface;
mod synthesizer;

pub use surface::{MetaAttribute, MetaTag, MetadataSurface};
pub use synthesizer::MetadataSynthesizer;
