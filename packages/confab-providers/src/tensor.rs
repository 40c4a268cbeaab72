use std::time::Duration;

use reqwest::{
	Client,
	header::{AUTHORIZATION, HeaderMap},
};
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result};

/// One ranked match from the tensor-search service. The `id` is the service's
/// opaque document id, not a message id on our side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorHit {
	pub id: String,
	pub chat_id: Uuid,
	pub content: String,
	pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorResponse {
	pub hits: Vec<TensorHit>,
	pub query: String,
}

pub async fn search(cfg: &confab_config::Tensor, query: &str) -> Result<TensorResponse> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}/indexes/{}/search", cfg.url.trim_end_matches('/'), cfg.index);
	let body = serde_json::json!({
		"q": query,
	});
	let res = client.post(url).headers(auth_headers(cfg.api_key.as_deref())?).json(&body).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_search_response(json)
}

fn auth_headers(api_key: Option<&str>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();

	if let Some(key) = api_key {
		headers.insert(AUTHORIZATION, format!("Bearer {key}").parse()?);
	}

	Ok(headers)
}

fn parse_search_response(json: Value) -> Result<TensorResponse> {
	let hits = json.get("hits").and_then(|v| v.as_array()).ok_or_else(|| {
		Error::InvalidResponse { message: "Search response is missing hits array.".to_string() }
	})?;
	let query = json.get("query").and_then(|v| v.as_str()).unwrap_or_default().to_string();
	let mut parsed = Vec::with_capacity(hits.len());

	for hit in hits {
		parsed.push(parse_hit(hit)?);
	}

	Ok(TensorResponse { hits: parsed, query })
}

fn parse_hit(hit: &Value) -> Result<TensorHit> {
	// The service names its document id "_id"; tolerate a plain "id" as well,
	// and numeric ids from older index builds.
	let id = hit
		.get("_id")
		.or_else(|| hit.get("id"))
		.and_then(|v| match v {
			Value::String(s) => Some(s.clone()),
			Value::Number(n) => Some(n.to_string()),
			_ => None,
		})
		.ok_or_else(|| Error::InvalidResponse {
			message: "Search hit is missing an id.".to_string(),
		})?;
	let chat_id = hit
		.get("chat_id")
		.and_then(|v| v.as_str())
		.and_then(|s| Uuid::parse_str(s).ok())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Search hit is missing a valid chat_id.".to_string(),
		})?;
	let content = hit.get("content").and_then(|v| v.as_str()).ok_or_else(|| {
		Error::InvalidResponse { message: "Search hit is missing content.".to_string() }
	})?;
	let role = hit.get("role").and_then(|v| v.as_str()).ok_or_else(|| {
		Error::InvalidResponse { message: "Search hit is missing a role.".to_string() }
	})?;

	Ok(TensorHit { id, chat_id, content: content.to_string(), role: role.to_string() })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hits_in_response_order() {
		let first = Uuid::new_v4();
		let second = Uuid::new_v4();
		let json = serde_json::json!({
			"hits": [
				{ "_id": "doc-1", "chat_id": first.to_string(), "content": "alpha", "role": "user" },
				{ "_id": "doc-2", "chat_id": second.to_string(), "content": "beta", "role": "assistant" }
			],
			"query": "alpha"
		});
		let parsed = parse_search_response(json).expect("parse failed");

		assert_eq!(parsed.query, "alpha");
		assert_eq!(parsed.hits.len(), 2);
		assert_eq!(parsed.hits[0].id, "doc-1");
		assert_eq!(parsed.hits[0].chat_id, first);
		assert_eq!(parsed.hits[1].role, "assistant");
	}

	#[test]
	fn accepts_numeric_hit_ids() {
		let chat_id = Uuid::new_v4();
		let json = serde_json::json!({
			"hits": [
				{ "_id": 4_211_777_310_u64, "chat_id": chat_id.to_string(), "content": "x", "role": "user" }
			],
			"query": "x"
		});
		let parsed = parse_search_response(json).expect("parse failed");

		assert_eq!(parsed.hits[0].id, "4211777310");
	}

	#[test]
	fn rejects_response_without_hits() {
		let err = parse_search_response(serde_json::json!({ "query": "x" }))
			.expect_err("missing hits must fail");

		assert!(matches!(err, Error::InvalidResponse { .. }));
	}

	#[test]
	fn rejects_hit_with_bad_chat_id() {
		let json = serde_json::json!({
			"hits": [
				{ "_id": "doc-1", "chat_id": "not-a-uuid", "content": "x", "role": "user" }
			],
			"query": "x"
		});
		let err = parse_search_response(json).expect_err("bad chat_id must fail");

		assert!(matches!(err, Error::InvalidResponse { .. }));
	}

	#[test]
	fn empty_hits_parse_to_empty_response() {
		let parsed = parse_search_response(serde_json::json!({ "hits": [], "query": "q" }))
			.expect("parse failed");

		assert!(parsed.hits.is_empty());
	}
}
