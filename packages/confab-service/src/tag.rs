use confab_domain::result::{SearchOutcome, SearchResult};

use crate::{ChatSearch, Result, summarize};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TagRequest {
	pub query: String,
}

impl ChatSearch {
	/// Chat-level tag lookup. Matching is entirely storage's; each chat comes
	/// back with an empty message list since there is nothing to highlight
	/// inline. The echoed query carries the "tag: " prefix so downstream
	/// display can tell a tag search from a content search on the same text.
	pub async fn tag(&self, req: TagRequest) -> Result<SearchOutcome> {
		let chats = self.store.find_chats_by_tag(&req.query).await?;
		let results = chats
			.iter()
			.map(|chat| SearchResult::new(summarize(chat), Vec::new()))
			.collect();

		Ok(SearchOutcome::new(format!("tag: {}", req.query), results))
	}
}
