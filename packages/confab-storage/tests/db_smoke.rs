use std::env;

use uuid::Uuid;

use confab_config::Postgres;
use confab_storage::{db::Db, queries};

fn env_dsn() -> Option<String> {
	env::var("CONFAB_PG_DSN").ok()
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set CONFAB_PG_DSN to run."]
async fn tables_exist_after_bootstrap() {
	let Some(dsn) = env_dsn() else {
		eprintln!("Skipping tables_exist_after_bootstrap; set CONFAB_PG_DSN to run this test.");

		return;
	};
	let cfg = Postgres { dsn, pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	for table in ["chats", "messages"] {
		let count: i64 = sqlx::query_scalar(
			"SELECT count(*) FROM information_schema.tables WHERE table_name = $1",
		)
		.bind(table)
		.fetch_one(&db.pool)
		.await
		.expect("Failed to query schema tables.");

		assert_eq!(count, 1, "missing table {table}");
	}
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set CONFAB_PG_DSN to run."]
async fn content_and_tag_lookups_round_trip() {
	let Some(dsn) = env_dsn() else {
		eprintln!("Skipping content_and_tag_lookups_round_trip; set CONFAB_PG_DSN to run this test.");

		return;
	};
	let cfg = Postgres { dsn, pool_max_conns: 1 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	let user_id = Uuid::new_v4();
	let chat_id = Uuid::new_v4();
	let marker = format!("marker-{}", Uuid::new_v4().simple());

	sqlx::query("INSERT INTO chats (chat_id, user_id, title, tags) VALUES ($1, $2, $3, $4)")
		.bind(chat_id)
		.bind(user_id)
		.bind("smoke test chat")
		.bind(vec![marker.clone()])
		.execute(&db.pool)
		.await
		.expect("Failed to insert chat.");
	sqlx::query("INSERT INTO messages (message_id, chat_id, role, content) VALUES ($1, $2, $3, $4)")
		.bind(Uuid::new_v4())
		.bind(chat_id)
		.bind("user")
		.bind(format!("hello {marker} world"))
		.execute(&db.pool)
		.await
		.expect("Failed to insert message.");

	let messages = queries::find_messages_matching(&db, user_id, &marker)
		.await
		.expect("Content lookup failed.");

	assert_eq!(messages.len(), 1);
	assert_eq!(messages[0].chat_id, chat_id);

	let other_user = queries::find_messages_matching(&db, Uuid::new_v4(), &marker)
		.await
		.expect("Content lookup failed.");

	assert!(other_user.is_empty());

	let chats = queries::find_chats_by_tag(&db, &marker).await.expect("Tag lookup failed.");

	assert_eq!(chats.len(), 1);
	assert_eq!(chats[0].chat_id, chat_id);

	let resolved = queries::find_chats_by_ids(&db, &[chat_id, Uuid::new_v4()])
		.await
		.expect("Batched lookup failed.");

	assert_eq!(resolved.len(), 1);

	let single = queries::find_chat_by_id(&db, chat_id).await.expect("Single lookup failed.");

	assert!(single.is_some());

	let absent = queries::find_chat_by_id(&db, Uuid::new_v4()).await.expect("Single lookup failed.");

	assert!(absent.is_none());

	sqlx::query("DELETE FROM chats WHERE chat_id = $1")
		.bind(chat_id)
		.execute(&db.pool)
		.await
		.expect("Failed to clean up chat.");
}
