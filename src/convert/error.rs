use thiserror::Error;

/// Fatal structural defects in the source document.
///
/// These abort the whole conversion with no partial output. Recoverable
/// conditions (degenerate normals, influencer overflow) are reported as
/// [`super::ValidationIssue`] warnings instead.
#[derive(Debug, Error)]
pub enum StructuralError {
    #[error("found a {0}-sided face, expected quad")]
    NonQuadFace(usize),

    #[error("face references vertex {index} but the mesh has only {vertex_count} vertices")]
    FaceIndexOutOfRange { index: u32, vertex_count: usize },

    #[error("skeleton references parent bone '{0}' before it is declared")]
    ParentBeforeDeclaration(String),

    #[error("bone '{0}' produces a zero-norm rest rotation")]
    DegenerateRestRotation(String),

    #[error("weight table references unknown bone '{0}'")]
    UnknownWeightBone(String),

    #[error("weight table references vertex {index} but the mesh has only {vertex_count} vertices")]
    WeightVertexOutOfRange { index: u32, vertex_count: usize },
}
