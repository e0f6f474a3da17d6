use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    OutOfBounds,
    InvalidStride,
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    EmptyStack,
    ImageTooSmall {
        width: usize,
        height: usize,
        min_dim: usize,
    },
    PanoramaGeometry { width: usize, height: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::OutOfBounds => write!(f, "out of bounds"),
            Self::InvalidStride => write!(f, "invalid stride"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            Self::EmptyStack => write!(f, "image stack is empty"),
            Self::ImageTooSmall {
                width,
                height,
                min_dim,
            } => {
                write!(
                    f,
                    "image {width}x{height} is too small: shorter dimension must be at least {min_dim}"
                )
            }
            Self::PanoramaGeometry { width, height } => {
                write!(
                    f,
                    "panorama geometry infeasible for {width}x{height} image"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
