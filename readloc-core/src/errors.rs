use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegionSetError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("Error parsing region: {0}")]
    RegionParseError(String),

    #[error("Corrupted file. 0 regions found in the file: {0}")]
    EmptyRegionSet(String),

    #[error("No region files found in directory: {0}")]
    EmptyRegionDirectory(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
