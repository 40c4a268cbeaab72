use uuid::Uuid;

/// Template selector carried on every result so a rendering layer can pick the
/// view without inspecting which strategy produced the match.
pub const RESULT_PARTIAL: &str = "chats/result";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ChatSummary {
	pub chat_id: Uuid,
	pub user_id: Uuid,
	pub title: String,
}

/// Uniform message shape inside a result. Content hits are projected from
/// storage rows; tensor hits are built straight from the hit payload and are
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MessageView {
	pub id: String,
	pub content: String,
	pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SearchResult {
	pub chat: ChatSummary,
	pub messages: Vec<MessageView>,
	pub partial_path: &'static str,
}
impl SearchResult {
	pub fn new(chat: ChatSummary, messages: Vec<MessageView>) -> Self {
		Self { chat, messages, partial_path: RESULT_PARTIAL }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SearchOutcome {
	pub query: String,
	pub results: Vec<SearchResult>,
}
impl SearchOutcome {
	pub fn new(query: impl Into<String>, results: Vec<SearchResult>) -> Self {
		Self { query: query.into(), results }
	}

	pub fn empty(query: impl Into<String>) -> Self {
		Self { query: query.into(), results: Vec::new() }
	}
}
