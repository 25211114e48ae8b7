use segbuf::BufferError;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error(transparent)]
    Buffer(#[from] BufferError),

    #[error("sink accepted {accepted} of {offered} bytes")]
    Aborted { offered: usize, accepted: usize },
}

pub type Result<T> = std::result::Result<T, CaptureError>;
