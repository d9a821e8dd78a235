use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// 招式查詢失敗時使用的屬性
pub const UNKNOWN_TYPE: &str = "unknown";

/// 沒有英文圖鑑說明時的替代文字
pub const DESCRIPTION_FALLBACK: &str = "No English description available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    Primary,
    Secondary,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Primary, Slot::Secondary];

    pub fn other(self) -> Slot {
        match self {
            Slot::Primary => Slot::Secondary,
            Slot::Secondary => Slot::Primary,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Slot::Primary => 0,
            Slot::Secondary => 1,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "move{}", self.number())
    }
}

/// A creature's learnable moves, ordered by raw identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovePool {
    moves: BTreeSet<String>,
}

impl MovePool {
    pub fn new<I, S>(moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            moves: moves.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.moves.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.moves.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSelection {
    pub identifier: String,
    pub display_name: String,
    /// `None` while the type lookup is still in flight.
    pub elemental_type: Option<String>,
    pub damage: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardModel {
    pub subject_name: Option<String>,
    pub primary_type: Option<String>,
    pub sprite_url: Option<String>,
    pub subject_id: Option<u32>,
    pub raw_height: Option<u32>,
    pub raw_weight: Option<u32>,
    pub description: Option<String>,
    pub cry_url: Option<String>,
    pub hit_points: Option<u16>,
    pub moves: BTreeMap<Slot, MoveSelection>,
}

/// Snapshot produced by a successful submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReadyCard {
    pub subject_name: String,
    pub primary_type: String,
    pub sprite_url: String,
    pub subject_id: u32,
    pub raw_height: u32,
    pub raw_weight: u32,
    pub height_display: String,
    pub weight_display: String,
    pub description: Option<String>,
    pub cry_url: Option<String>,
    pub hit_points: u16,
    pub moves: BTreeMap<Slot, MoveSelection>,
}

// PokeAPI payloads. Only the fields the card needs are deserialized.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectMove {
    #[serde(rename = "move")]
    pub move_ref: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectType {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub other: HashMap<String, Artwork>,
}

impl Sprites {
    pub fn official_artwork(&self) -> Option<&str> {
        self.other
            .get("official-artwork")
            .and_then(|artwork| artwork.front_default.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cries {
    pub latest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectPayload {
    pub id: u32,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub moves: Vec<SubjectMove>,
    pub types: Vec<SubjectType>,
    pub sprites: Sprites,
    #[serde(default)]
    pub cries: Cries,
}

impl SubjectPayload {
    pub fn move_identifiers(&self) -> impl Iterator<Item = &str> {
        self.moves.iter().map(|m| m.move_ref.name.as_str())
    }

    /// 依 slot 排序後的第一個屬性
    pub fn primary_type(&self) -> Option<&str> {
        self.types
            .iter()
            .min_by_key(|t| t.slot)
            .map(|t| t.type_ref.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovePayload {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesPayload {
    pub name: String,
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_pool_is_sorted_and_deduplicated() {
        let pool = MovePool::new(["water-gun", "bubble", "tackle", "bubble"]);
        let moves: Vec<&str> = pool.iter().collect();
        assert_eq!(moves, vec!["bubble", "tackle", "water-gun"]);
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn test_subject_payload_deserializes_pokeapi_shape() {
        let json = serde_json::json!({
            "id": 7,
            "name": "squirtle",
            "height": 5,
            "weight": 90,
            "moves": [{"move": {"name": "tackle", "url": "x"}, "version_group_details": []}],
            "types": [
                {"slot": 2, "type": {"name": "flying"}},
                {"slot": 1, "type": {"name": "water"}}
            ],
            "sprites": {
                "front_default": "https://img/front.png",
                "other": {"official-artwork": {"front_default": "https://img/art.png"}}
            },
            "cries": {"latest": "https://cry/7.ogg", "legacy": null}
        });

        let payload: SubjectPayload = serde_json::from_value(json).unwrap();
        assert_eq!(payload.primary_type(), Some("water"));
        assert_eq!(payload.sprites.official_artwork(), Some("https://img/art.png"));
        assert_eq!(payload.move_identifiers().collect::<Vec<_>>(), vec!["tackle"]);
        assert_eq!(payload.cries.latest.as_deref(), Some("https://cry/7.ogg"));
    }

    #[test]
    fn test_slot_other_and_display() {
        assert_eq!(Slot::Primary.other(), Slot::Secondary);
        assert_eq!(Slot::Secondary.other(), Slot::Primary);
        assert_eq!(Slot::Secondary.to_string(), "move2");
    }
}
