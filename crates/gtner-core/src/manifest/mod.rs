pub mod document;
pub mod entity;

pub use document::{
    AnnotationBlock, Annotations, DEFAULT_ATTR, EntityScore, LabelDef, ManifestLine,
    MetadataBlock, RawEntity,
};
pub use entity::{EntityOrder, EntitySpan, entities};
