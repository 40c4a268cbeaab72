use uuid::Uuid;

use confab_domain::result::{MessageView, SearchOutcome};

use crate::{ChatSearch, Error, Result, collect_results, summaries_by_id};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TensorRequest {
	pub query: String,
	/// Only consulted when `search.scope_to_user` is enabled; the reference
	/// behavior is a global semantic search.
	pub user_id: Option<Uuid>,
}

impl ChatSearch {
	/// Semantic search delegated to the external tensor service. Hit order is
	/// the service's relevance ranking and is preserved through grouping; hits
	/// pointing at chats that no longer resolve are dropped, not fatal.
	pub async fn tensor(&self, req: TensorRequest) -> Result<SearchOutcome> {
		let TensorRequest { query, user_id } = req;
		let scope_user = if self.cfg.search.scope_to_user {
			match user_id {
				Some(user) => Some(user),
				None =>
					return Err(Error::InvalidRequest {
						message: "Tensor search is scoped to users; a user_id is required."
							.to_string(),
					}),
			}
		} else {
			None
		};

		tracing::debug!(query_len = query.len(), "Running tensor search.");

		let response = self.tensor.search(&self.cfg.tensor, &query).await?;

		// The backend echoes its own query field; the outcome always carries
		// the caller's input.
		if response.hits.is_empty() {
			return Ok(SearchOutcome::empty(query));
		}

		let mut chat_ids: Vec<Uuid> = Vec::new();

		for hit in &response.hits {
			if !chat_ids.contains(&hit.chat_id) {
				chat_ids.push(hit.chat_id);
			}
		}

		let mut summaries = summaries_by_id(self.store.find_chats_by_ids(chat_ids).await?);

		if let Some(user) = scope_user {
			summaries.retain(|chat_id, chat| {
				if chat.user_id == user {
					return true;
				}

				tracing::warn!(chat_id = %chat_id, "Dropping hit for chat outside the user scope.");

				false
			});
		}

		let pairs = response
			.hits
			.into_iter()
			.map(|hit| {
				(hit.chat_id, MessageView { id: hit.id, content: hit.content, role: hit.role })
			})
			.collect();

		Ok(SearchOutcome::new(query, collect_results(pairs, &summaries)))
	}
}
