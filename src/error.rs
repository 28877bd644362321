/// Errors raised at the boundary where hosts hand data and configuration to the crate.
///
/// Building and visualizing trees never fails; empty inputs give empty trees.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("interleaved point buffer has length {0}, which is not a multiple of 3")]
    FlatLength(usize),
    #[error("octree needs at least one level")]
    ZeroLevels,
}

pub type Result<T> = std::result::Result<T, Error>;
