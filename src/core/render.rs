use crate::domain::model::{RenderReadyCard, UNKNOWN_TYPE};
use serde::{Deserialize, Serialize};

/// (type, card background, sprite panel background)
static TYPE_COLORS: [(&str, &str, &str); 18] = [
    ("normal", "#F5F5DC", "#E5DCC9"),
    ("fire", "#FFB347", "#E6A033"),
    ("water", "#87CEEB", "#7BB8D3"),
    ("electric", "#FFFF99", "#E6E680"),
    ("grass", "#98FB98", "#85E085"),
    ("ice", "#E0FFFF", "#CCE6E6"),
    ("fighting", "#F0B27A", "#D99966"),
    ("poison", "#DDA0DD", "#C285C2"),
    ("ground", "#F4A460", "#D1934D"),
    ("flying", "#E6E6FA", "#CCCCDD"),
    ("psychic", "#FFB6C1", "#E699A8"),
    ("bug", "#ADFF2F", "#99E632"),
    ("rock", "#D2B48C", "#BFA175"),
    ("ghost", "#E6E6FA", "#CCCCDD"),
    ("dragon", "#DDA0DD", "#C285C2"),
    ("dark", "#D3D3D3", "#BFBFBF"),
    ("steel", "#E5E4E2", "#D1CFC8"),
    ("fairy", "#FFE4E1", "#E6CCCA"),
];

/// 找不到屬性時用 normal 的配色
pub fn type_colors(type_name: &str) -> (&'static str, &'static str) {
    let (_, primary, secondary) = TYPE_COLORS
        .iter()
        .find(|(name, _, _)| *name == type_name)
        .unwrap_or(&TYPE_COLORS[0]);
    (*primary, *secondary)
}

pub fn type_icon_path(type_name: &str) -> String {
    format!("images/types/{}.svg", type_name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveView {
    pub type_name: String,
    pub type_icon: String,
    pub name: String,
    pub damage: String,
}

/// Everything the card surface shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub name: String,
    pub hp: String,
    pub type_name: String,
    pub type_icon: String,
    pub sprite_url: String,
    pub id: String,
    pub height: String,
    pub weight: String,
    pub entry: String,
    pub moves: Vec<MoveView>,
    pub primary_color: String,
    pub secondary_color: String,
    pub cry_url: Option<String>,
}

pub fn render_card(card: &RenderReadyCard) -> CardView {
    let (primary_color, secondary_color) = type_colors(&card.primary_type);

    let moves = card
        .moves
        .values()
        .map(|selection| {
            let type_name = selection
                .elemental_type
                .clone()
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string());
            MoveView {
                type_icon: type_icon_path(&type_name),
                type_name,
                name: selection.display_name.clone(),
                damage: selection.damage.map(|d| d.to_string()).unwrap_or_default(),
            }
        })
        .collect();

    CardView {
        name: card.subject_name.clone(),
        hp: card.hit_points.to_string(),
        type_name: card.primary_type.clone(),
        type_icon: type_icon_path(&card.primary_type),
        sprite_url: card.sprite_url.clone(),
        id: card.subject_id.to_string(),
        height: card.height_display.clone(),
        weight: card.weight_display.clone(),
        entry: card.description.clone().unwrap_or_default(),
        moves,
        primary_color: primary_color.to_string(),
        secondary_color: secondary_color.to_string(),
        cry_url: card.cry_url.clone(),
    }
}

/// Parses `#RRGGBB`.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}
