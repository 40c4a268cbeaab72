use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Chat {
	pub chat_id: Uuid,
	pub user_id: Uuid,
	pub title: String,
	pub tags: Vec<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Message {
	pub message_id: Uuid,
	pub chat_id: Uuid,
	pub role: String,
	pub content: String,
	pub created_at: OffsetDateTime,
}
