//! jsdoc-reconcile: merge inferred documentation into existing JSDoc
//! comments without losing what people wrote.
//!
//! A declaration's leading comments go through [`extract`]. When a
//! documentation block exists it is merged with the inferred metadata by
//! [`reconcile`]; otherwise [`build_fresh`] writes one from scratch. The
//! resulting lines are wrapped back into comment syntax by
//! [`render::to_block`].

pub mod canonical;
pub mod extract;
pub mod fresh;
pub mod manifest;
pub mod model;
pub mod reconcile;
pub mod render;
pub mod tags;
pub mod vocab;

pub use extract::{extract, CommentKind, RawComment};
pub use fresh::build_fresh;
pub use model::{
    ClassMetadata, FunctionMetadata, InferredMetadata, NormalizedLines, ParamInfo, ReturnsInfo,
    ThrowsInfo,
};
pub use reconcile::reconcile;

/// Documentation lines for one declaration: reconciled when it already
/// has a doc block, built fresh otherwise.
pub fn document(comments: &[RawComment], metadata: &InferredMetadata) -> NormalizedLines {
    match extract(comments) {
        Some(existing) => {
            tracing::debug!(
                declaration = %metadata.name(),
                lines = existing.len(),
                "reconciling existing documentation"
            );
            reconcile(&existing, metadata)
        }
        None => {
            tracing::debug!(declaration = %metadata.name(), "no documentation block; building fresh");
            build_fresh(metadata)
        }
    }
}
