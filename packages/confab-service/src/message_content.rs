use uuid::Uuid;

use confab_domain::result::{MessageView, SearchOutcome};
use confab_storage::models::Message;

use crate::{ChatSearch, Result, collect_results, summaries_by_id};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MessageContentRequest {
	pub user_id: Uuid,
	pub query: String,
}

impl ChatSearch {
	/// Literal-text search over the user's own messages, grouped by chat in
	/// the order storage returned them.
	pub async fn message_content(&self, req: MessageContentRequest) -> Result<SearchOutcome> {
		let MessageContentRequest { user_id, query } = req;

		// An empty pattern would match every message; treat it as no matches.
		if query.trim().is_empty() {
			return Ok(SearchOutcome::empty(query));
		}

		tracing::debug!(query_len = query.len(), "Running content search.");

		let messages = self.store.find_messages_matching(user_id, &query).await?;

		if messages.is_empty() {
			return Ok(SearchOutcome::empty(query));
		}

		let mut chat_ids: Vec<Uuid> = Vec::new();

		for message in &messages {
			if !chat_ids.contains(&message.chat_id) {
				chat_ids.push(message.chat_id);
			}
		}

		let summaries = summaries_by_id(self.store.find_chats_by_ids(chat_ids).await?);
		let pairs = messages.into_iter().map(|message| (message.chat_id, view(message))).collect();

		Ok(SearchOutcome::new(query, collect_results(pairs, &summaries)))
	}
}

fn view(message: Message) -> MessageView {
	MessageView {
		id: message.message_id.to_string(),
		content: message.content,
		role: message.role,
	}
}
