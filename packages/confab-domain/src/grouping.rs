use std::collections::HashMap;

use uuid::Uuid;

/// Stable group-by-chat. Groups appear in the order their chat was first seen
/// and members keep their relative input order; for ranked producers that
/// order encodes relevance, so nothing here re-sorts.
pub fn group_by_chat<T>(pairs: Vec<(Uuid, T)>) -> Vec<(Uuid, Vec<T>)> {
	let mut groups: Vec<(Uuid, Vec<T>)> = Vec::new();
	let mut index: HashMap<Uuid, usize> = HashMap::new();

	for (chat_id, item) in pairs {
		match index.get(&chat_id) {
			Some(&slot) => groups[slot].1.push(item),
			None => {
				index.insert(chat_id, groups.len());
				groups.push((chat_id, vec![item]));
			},
		}
	}

	groups
}
