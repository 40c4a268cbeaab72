pub mod message_content;
pub mod tag;
pub mod tensor;

mod error;

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use uuid::Uuid;

use confab_config::Config;
use confab_domain::result::{ChatSummary, MessageView, SearchResult};
use confab_providers::tensor::TensorResponse;
use confab_storage::{
	db::Db,
	models::{Chat, Message},
	queries,
};
pub use error::{Error, Result};
pub use message_content::MessageContentRequest;
pub use tag::TagRequest;
pub use tensor::TensorRequest;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Relational lookups the dispatcher depends on. Matching semantics behind
/// these calls belong to storage; this layer only reshapes what comes back.
pub trait SearchStore
where
	Self: Send + Sync,
{
	fn find_messages_matching<'a>(
		&'a self,
		user_id: Uuid,
		text: &'a str,
	) -> BoxFuture<'a, Result<Vec<Message>>>;

	fn find_chats_by_tag<'a>(&'a self, tag: &'a str) -> BoxFuture<'a, Result<Vec<Chat>>>;

	fn find_chats_by_ids<'a>(&'a self, ids: Vec<Uuid>) -> BoxFuture<'a, Result<Vec<Chat>>>;
}

pub trait TensorSearcher
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a confab_config::Tensor,
		query: &'a str,
	) -> BoxFuture<'a, Result<TensorResponse>>;
}

pub struct ChatSearch {
	pub cfg: Config,
	pub store: Arc<dyn SearchStore>,
	pub tensor: Arc<dyn TensorSearcher>,
}
impl ChatSearch {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, store: Arc::new(PgSearchStore { db }), tensor: Arc::new(HttpTensorSearcher) }
	}

	pub fn with_backends(
		cfg: Config,
		store: Arc<dyn SearchStore>,
		tensor: Arc<dyn TensorSearcher>,
	) -> Self {
		Self { cfg, store, tensor }
	}
}

struct PgSearchStore {
	db: Db,
}
impl SearchStore for PgSearchStore {
	fn find_messages_matching<'a>(
		&'a self,
		user_id: Uuid,
		text: &'a str,
	) -> BoxFuture<'a, Result<Vec<Message>>> {
		Box::pin(async move { Ok(queries::find_messages_matching(&self.db, user_id, text).await?) })
	}

	fn find_chats_by_tag<'a>(&'a self, tag: &'a str) -> BoxFuture<'a, Result<Vec<Chat>>> {
		Box::pin(async move { Ok(queries::find_chats_by_tag(&self.db, tag).await?) })
	}

	fn find_chats_by_ids<'a>(&'a self, ids: Vec<Uuid>) -> BoxFuture<'a, Result<Vec<Chat>>> {
		Box::pin(async move { Ok(queries::find_chats_by_ids(&self.db, &ids).await?) })
	}
}

struct HttpTensorSearcher;
impl TensorSearcher for HttpTensorSearcher {
	fn search<'a>(
		&'a self,
		cfg: &'a confab_config::Tensor,
		query: &'a str,
	) -> BoxFuture<'a, Result<TensorResponse>> {
		Box::pin(async move { Ok(confab_providers::tensor::search(cfg, query).await?) })
	}
}

pub(crate) fn summarize(chat: &Chat) -> ChatSummary {
	ChatSummary { chat_id: chat.chat_id, user_id: chat.user_id, title: chat.title.clone() }
}

pub(crate) fn summaries_by_id(chats: Vec<Chat>) -> HashMap<Uuid, ChatSummary> {
	chats.iter().map(|chat| (chat.chat_id, summarize(chat))).collect()
}

/// Shared tail of the message-level strategies: stable group-by-chat, then one
/// result per chat that resolved. Groups whose chat is absent from `summaries`
/// are dropped with a warning instead of failing the whole search.
pub(crate) fn collect_results(
	pairs: Vec<(Uuid, MessageView)>,
	summaries: &HashMap<Uuid, ChatSummary>,
) -> Vec<SearchResult> {
	let mut results = Vec::new();

	for (chat_id, messages) in confab_domain::grouping::group_by_chat(pairs) {
		let Some(chat) = summaries.get(&chat_id) else {
			tracing::warn!(chat_id = %chat_id, "Skipping matches for unresolved chat.");

			continue;
		};

		results.push(SearchResult::new(chat.clone(), messages));
	}

	results
}
