pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Tensor search error: {message}")]
	Tensor { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<confab_storage::Error> for Error {
	fn from(err: confab_storage::Error) -> Self {
		match err {
			confab_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
		}
	}
}

impl From<confab_providers::Error> for Error {
	fn from(err: confab_providers::Error) -> Self {
		Self::Tensor { message: err.to_string() }
	}
}
