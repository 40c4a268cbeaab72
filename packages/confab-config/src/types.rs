use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub tensor: Tensor,
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Tensor {
	pub url: String,
	pub index: String,
	pub api_key: Option<String>,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	/// When true, tensor search requires a requesting user and drops hits that
	/// resolve to chats owned by someone else. The reference behavior is a
	/// global, unscoped tensor search; flipping this is a deliberate product
	/// decision, not a default.
	#[serde(default)]
	pub scope_to_user: bool,
}
