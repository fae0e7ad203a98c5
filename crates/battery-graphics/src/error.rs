use core::fmt;

use thiserror::Error;

/// Which of the batch's auxiliary stacks an operation referred to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StackKind {
    Matrix,
    Target,
}

impl fmt::Display for StackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackKind::Matrix => f.write_str("matrix"),
            StackKind::Target => f.write_str("render target"),
        }
    }
}

/// Which mesh buffer hit its configured limit.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MeshBuffer {
    Vertices,
    Indices,
}

impl fmt::Display for MeshBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshBuffer::Vertices => f.write_str("vertex"),
            MeshBuffer::Indices => f.write_str("index"),
        }
    }
}

/// Errors raised while batching or presenting a frame.
///
/// All of them are local to the current frame: `Batch::clear` resets every
/// piece of state they could have left behind.
#[derive(Debug, Error)]
pub enum BatchError {
    /// `pop_matrix` / `pop_target` with nothing pushed.
    #[error("cannot pop the {stack} stack: it is empty")]
    StackUnderflow { stack: StackKind },

    /// An append would grow a mesh buffer beyond its configured maximum.
    #[error("{buffer} buffer exhausted: {requested} elements requested, limit is {limit}")]
    ResourceExhausted {
        buffer: MeshBuffer,
        requested: usize,
        limit: usize,
    },

    /// A block-relative index points past the vertices appended with it.
    #[error("index {index} is out of range for a block of {vertices} vertices")]
    InvalidIndex { index: u32, vertices: usize },

    /// A vertex attribute has no matching GPU vertex format.
    #[error("vertex attribute `{name}` has no matching vertex format")]
    UnsupportedAttribute { name: &'static str },

    /// Failure reported by the graphics backend.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type Result<T> = core::result::Result<T, BatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underflow_names_the_stack() {
        let err = BatchError::StackUnderflow { stack: StackKind::Target };
        assert_eq!(err.to_string(), "cannot pop the render target stack: it is empty");
    }

    #[test]
    fn exhausted_reports_limit() {
        let err = BatchError::ResourceExhausted {
            buffer: MeshBuffer::Indices,
            requested: 12,
            limit: 8,
        };
        assert_eq!(
            err.to_string(),
            "index buffer exhausted: 12 elements requested, limit is 8"
        );
    }

    #[test]
    fn invalid_index_reports_block_size() {
        let err = BatchError::InvalidIndex { index: 9, vertices: 1 };
        assert_eq!(err.to_string(), "index 9 is out of range for a block of 1 vertices");
    }

    #[test]
    fn backend_errors_are_transparent() {
        let err: BatchError = anyhow::anyhow!("device lost").into();
        assert_eq!(err.to_string(), "device lost");
    }
}
