pub mod error;
pub mod response;

pub use error::AppError;

pub type AppResult<T> = Result<T, AppError>;
