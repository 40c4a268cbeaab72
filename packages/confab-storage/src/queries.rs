use uuid::Uuid;

use crate::{
	Result,
	db::Db,
	models::{Chat, Message},
};

/// Messages inside the user's chats whose content contains the query text,
/// case-insensitively. Ordered oldest first so grouped results read like the
/// conversation did.
pub async fn find_messages_matching(db: &Db, user_id: Uuid, text: &str) -> Result<Vec<Message>> {
	let pattern = format!("%{}%", escape_like(text));
	let messages = sqlx::query_as::<_, Message>(
		"\
SELECT m.message_id, m.chat_id, m.role, m.content, m.created_at
FROM messages m
JOIN chats c ON c.chat_id = m.chat_id
WHERE c.user_id = $1
	AND m.content ILIKE $2 ESCAPE '\\'
ORDER BY m.created_at, m.message_id",
	)
	.bind(user_id)
	.bind(pattern.as_str())
	.fetch_all(&db.pool)
	.await?;

	Ok(messages)
}

/// Chats labeled with the given tag, most recently updated first.
pub async fn find_chats_by_tag(db: &Db, tag: &str) -> Result<Vec<Chat>> {
	let chats = sqlx::query_as::<_, Chat>(
		"\
SELECT chat_id, user_id, title, tags, created_at, updated_at
FROM chats
WHERE $1 = ANY(tags)
ORDER BY updated_at DESC, chat_id",
	)
	.bind(tag)
	.fetch_all(&db.pool)
	.await?;

	Ok(chats)
}

pub async fn find_chats_by_ids(db: &Db, ids: &[Uuid]) -> Result<Vec<Chat>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let chats = sqlx::query_as::<_, Chat>(
		"\
SELECT chat_id, user_id, title, tags, created_at, updated_at
FROM chats
WHERE chat_id = ANY($1)",
	)
	.bind(ids)
	.fetch_all(&db.pool)
	.await?;

	Ok(chats)
}

pub async fn find_chat_by_id(db: &Db, id: Uuid) -> Result<Option<Chat>> {
	let chat = sqlx::query_as::<_, Chat>(
		"\
SELECT chat_id, user_id, title, tags, created_at, updated_at
FROM chats
WHERE chat_id = $1",
	)
	.bind(id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(chat)
}

fn escape_like(text: &str) -> String {
	let mut out = String::with_capacity(text.len());

	for ch in text.chars() {
		if matches!(ch, '%' | '_' | '\\') {
			out.push('\\');
		}

		out.push(ch);
	}

	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn escapes_like_metacharacters() {
		assert_eq!(escape_like("50% done_now"), "50\\% done\\_now");
		assert_eq!(escape_like("back\\slash"), "back\\\\slash");
		assert_eq!(escape_like("plain"), "plain");
	}
}
