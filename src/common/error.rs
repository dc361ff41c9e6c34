#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{0} already exists")]
    DuplicateKey(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("insufficient stock. Available: {available}")]
    InsufficientStock { available: u32 },
    #[error("price must be non-negative")]
    NegativePrice,
    #[error("invalid item index")]
    IndexOutOfRange,
    #[error("cannot commit an empty bill")]
    EmptyBill,
    #[error("parse error: {0}")]
    Parse(String),
    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}
