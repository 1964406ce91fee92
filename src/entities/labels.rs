use std::collections::{HashMap, HashSet};
use std::hash::BuildHasherDefault;
use nohash_hasher::NoHashHasher;

type Hasher = BuildHasherDefault<NoHashHasher<u32>>;

/// Two-way `tag <-> entity id` index. Tags are unique.
#[derive(Default)]
pub(crate) struct TagIndex {
	by_tag: HashMap<String, u32>,
	by_entity: HashMap<u32, String, Hasher>,
}

impl TagIndex {
	pub fn owner(&self, tag: &str) -> Option<u32> {
		self.by_tag.get(tag).copied()
	}

	pub fn tag_of(&self, entity: u32) -> Option<&str> {
		self.by_entity.get(&entity).map(String::as_str)
	}

	/// Bind `tag` to `entity`, releasing the entity's previous tag.
	/// The caller checks that nobody else owns `tag`.
	pub fn insert(&mut self, entity: u32, tag: String) {
		if let Some(previous) = self.by_entity.insert(entity, tag.clone()) {
			self.by_tag.remove(&previous);
		}
		self.by_tag.insert(tag, entity);
	}

	pub fn remove(&mut self, entity: u32) -> Option<String> {
		let tag = self.by_entity.remove(&entity)?;
		self.by_tag.remove(&tag);
		Some(tag)
	}

	pub fn len(&self) -> usize {
		self.by_tag.len()
	}

	pub fn clear(&mut self) {
		self.by_tag.clear();
		self.by_entity.clear();
	}
}

/// `group -> members` index with a back reference from each member to its single group.
#[derive(Default)]
pub(crate) struct GroupIndex {
	members: HashMap<String, HashSet<u32, Hasher>>,
	by_entity: HashMap<u32, String, Hasher>,
}

impl GroupIndex {
	pub fn members(&self, group: &str) -> impl Iterator<Item = u32> + '_ {
		self.members.get(group).into_iter().flatten().copied()
	}

	pub fn group_of(&self, entity: u32) -> Option<&str> {
		self.by_entity.get(&entity).map(String::as_str)
	}

	pub fn contains(&self, entity: u32, group: &str) -> bool {
		self.members.get(group).map_or(false, |m| m.contains(&entity))
	}

	/// Add `entity` to `group`, leaving the group it was in before.
	/// Returns that previous group when it differs.
	pub fn insert(&mut self, entity: u32, group: String) -> Option<String> {
		let previous = match self.by_entity.get(&entity) {
			Some(current) if *current == group => None,
			Some(_) => self.remove(entity),
			None => None,
		};

		self.members.entry(group.clone()).or_default().insert(entity);
		self.by_entity.insert(entity, group);
		previous
	}

	/// Drop `entity` from its group, deleting the group once it is empty.
	pub fn remove(&mut self, entity: u32) -> Option<String> {
		let group = self.by_entity.remove(&entity)?;
		if let Some(members) = self.members.get_mut(&group) {
			members.remove(&entity);
			if members.is_empty() {
				self.members.remove(&group);
			}
		}
		Some(group)
	}

	pub fn group_count(&self) -> usize {
		self.members.len()
	}

	pub fn clear(&mut self) {
		self.members.clear();
		self.by_entity.clear();
	}
}
