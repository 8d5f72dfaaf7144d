use serde::{Deserialize, Deserializer};

const PARTICIPANT_TAG: &str = "challenge";

/// Whether a person takes part in the initiative or is only connected to someone who does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Role {
	Participant,
	#[default]
	RelatedContact,
}

impl Role {
	pub fn from_tag(tag: &str) -> Self {
		if tag.trim() == PARTICIPANT_TAG {
			Role::Participant
		} else {
			Role::RelatedContact
		}
	}
}

impl From<String> for Role {
	fn from(tag: String) -> Self {
		Role::from_tag(&tag)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum RelationshipKind {
	#[serde(rename = "One-Way")]
	OneWay,
	Reciprocal,
}

/// One row of the follow-relationship dataset.
#[derive(Clone, Debug, Deserialize)]
pub struct RelationshipRecord {
	pub source: String,
	pub target: String,
	#[serde(rename = "person_A_id_str")]
	pub person_a_id: String,
	#[serde(rename = "person_A_username")]
	pub person_a_username: String,
	#[serde(rename = "person_A_number_followers", deserialize_with = "blank_as_zero")]
	pub person_a_followers: u64,
	#[serde(rename = "person_A_number_following", deserialize_with = "blank_as_zero")]
	pub person_a_following: u64,
	#[serde(rename = "person_A_number_tweets", deserialize_with = "blank_as_zero")]
	pub person_a_tweets: u64,
	#[serde(rename = "person_B_id_str")]
	pub person_b_id: String,
	#[serde(rename = "person_B_username")]
	pub person_b_username: String,
	#[serde(rename = "person_B_number_followers", deserialize_with = "blank_as_zero")]
	pub person_b_followers: u64,
	#[serde(rename = "person_B_number_following", deserialize_with = "blank_as_zero")]
	pub person_b_following: u64,
	#[serde(rename = "person_B_number_tweets", deserialize_with = "blank_as_zero")]
	pub person_b_tweets: u64,
	pub source_person_type: Role,
	pub target_person_type: Role,
	pub relationship_type: RelationshipKind,
	pub source_freq: f64,
	pub target_freq: f64,
}

/// Count cells are sometimes left blank in the export; read those as zero.
fn blank_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
	Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

impl RelationshipRecord {
	/// Role of the participant with `id`, judged against this record's declared source.
	pub fn role_of(&self, id: &str) -> Role {
		if id == self.source {
			self.source_person_type
		} else {
			self.target_person_type
		}
	}

	pub fn participant_a(&self) -> PersonProfile {
		PersonProfile {
			id: self.person_a_id.clone(),
			username: self.person_a_username.clone(),
			followers: self.person_a_followers,
			following: self.person_a_following,
			tweets: self.person_a_tweets,
			role: self.role_of(&self.person_a_id),
		}
	}

	pub fn participant_b(&self) -> PersonProfile {
		PersonProfile {
			id: self.person_b_id.clone(),
			username: self.person_b_username.clone(),
			followers: self.person_b_followers,
			following: self.person_b_following,
			tweets: self.person_b_tweets,
			role: self.role_of(&self.person_b_id),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct PersonProfile {
	pub id: String,
	pub username: String,
	pub followers: u64,
	pub following: u64,
	pub tweets: u64,
	pub role: Role,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersonNode {
	pub id: String,
	pub profile: Option<PersonProfile>,
}

impl PersonNode {
	pub fn role(&self) -> Role {
		self.profile.as_ref().map(|p| p.role).unwrap_or_default()
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct RelationshipLink {
	pub source: String,
	pub target: String,
	pub kind: RelationshipKind,
}

impl From<&RelationshipRecord> for RelationshipLink {
	fn from(record: &RelationshipRecord) -> Self {
		Self {
			source: record.source.clone(),
			target: record.target.clone(),
			kind: record.relationship_type,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SocialGraph {
	pub nodes: Vec<PersonNode>,
	pub links: Vec<RelationshipLink>,
}

impl SocialGraph {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}
}
