use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised by the library.
pub enum OError {
    #[error("The following error occurred: {0}")]
    Generic(String),
    #[error("The problem needs at least {2} {0} but {1} were given")]
    InvalidDimension(String, usize, usize),
    #[error("The tour must contain {0} cities but {1} were given")]
    InvalidLength(usize, usize),
    #[error("The city index {0} at tour position {1} is outside the range [0; {2}]")]
    IndexOutOfRange(usize, usize, usize),
    #[error("The {0} index {1} does not exist")]
    NonExistingIndex(String, usize),
    #[error("The min value ({0}) must be strictly smaller than the max value ({1}).")]
    TooLargeLowerBound(String, String),
    #[error("The distance matrix #{0} is not valid: {1}")]
    InvalidMatrix(usize, String),
    #[error("An error occurred when exporting the problem data: {0}")]
    Export(String),
}
