use crate::core::format::{extract_description, format_subject_name};
use crate::core::units::{format_height, format_weight};
use crate::domain::model::{
    CardModel, MoveSelection, RenderReadyCard, Slot, SpeciesPayload, SubjectPayload,
};
use crate::utils::error::{CardError, Result};
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct CardModelBuilder {
    model: CardModel,
}

impl CardModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self) -> &CardModel {
        &self.model
    }

    pub fn has_subject(&self) -> bool {
        self.model.subject_name.is_some()
    }

    /// 每次查到新的寶可夢都重建卡片資料
    pub fn on_subject_loaded(&mut self, payload: &SubjectPayload) {
        self.model = CardModel {
            subject_name: Some(format_subject_name(&payload.name)),
            primary_type: payload.primary_type().map(str::to_string),
            sprite_url: payload.sprites.official_artwork().map(str::to_string),
            subject_id: Some(payload.id),
            raw_height: Some(payload.height),
            raw_weight: Some(payload.weight),
            description: None,
            cry_url: payload.cries.latest.clone(),
            hit_points: None,
            moves: BTreeMap::new(),
        };
        tracing::debug!("Card model reset for {:?}", self.model.subject_name);
    }

    pub fn on_description_loaded(&mut self, species: &SpeciesPayload) {
        self.model.description = Some(extract_description(&species.flavor_text_entries));
    }

    /// Mirrors the coordinator's slot contents into the model.
    pub fn sync_moves<'a, I>(&mut self, selections: I)
    where
        I: IntoIterator<Item = (Slot, &'a MoveSelection)>,
    {
        self.model.moves = selections
            .into_iter()
            .map(|(slot, selection)| (slot, selection.clone()))
            .collect();
    }

    /// Submit step. Nothing is written unless the model can be finalized.
    pub fn finalize(
        &mut self,
        hit_points: u16,
        move1_damage: Option<u16>,
        move2_damage: Option<u16>,
    ) -> Result<RenderReadyCard> {
        let mut missing = Vec::new();
        if self.model.subject_name.is_none() {
            missing.push("subject_name");
        }
        if self.model.sprite_url.is_none() {
            missing.push("sprite_url");
        }
        if self.model.primary_type.is_none() {
            missing.push("primary_type");
        }
        if !missing.is_empty() {
            return Err(CardError::IncompleteModel { missing });
        }

        let has_move1 = self.model.moves.contains_key(&Slot::Primary);
        let has_move2 = self.model.moves.contains_key(&Slot::Secondary);
        if has_move2 && move2_damage.is_none() {
            return Err(missing_damage("move2_damage"));
        }
        // 第一招的傷害只有在沒有第二招時可省略
        if has_move1 && has_move2 && move1_damage.is_none() {
            return Err(missing_damage("move1_damage"));
        }

        self.model.hit_points = Some(hit_points);
        if let Some(selection) = self.model.moves.get_mut(&Slot::Primary) {
            selection.damage = move1_damage;
        }
        if let Some(selection) = self.model.moves.get_mut(&Slot::Secondary) {
            selection.damage = move2_damage;
        }

        let model = &self.model;
        let raw_height = model.raw_height.unwrap_or_default();
        let raw_weight = model.raw_weight.unwrap_or_default();

        Ok(RenderReadyCard {
            subject_name: model.subject_name.clone().unwrap_or_default(),
            primary_type: model.primary_type.clone().unwrap_or_default(),
            sprite_url: model.sprite_url.clone().unwrap_or_default(),
            subject_id: model.subject_id.unwrap_or_default(),
            raw_height,
            raw_weight,
            height_display: format_height(raw_height),
            weight_display: format_weight(raw_weight),
            description: model.description.clone(),
            cry_url: model.cry_url.clone(),
            hit_points,
            moves: model.moves.clone(),
        })
    }
}

fn missing_damage(field: &str) -> CardError {
    CardError::Validation {
        field: field.to_string(),
        value: String::new(),
        reason: "Damage is required once a second move is selected".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        Artwork, Cries, FlavorTextEntry, NamedResource, Sprites, SubjectMove, SubjectType,
        DESCRIPTION_FALLBACK,
    };
    use std::collections::HashMap;

    fn squirtle() -> SubjectPayload {
        let mut other = HashMap::new();
        other.insert(
            "official-artwork".to_string(),
            Artwork {
                front_default: Some("https://img/7.png".to_string()),
            },
        );
        SubjectPayload {
            id: 7,
            name: "squirtle".to_string(),
            height: 5,
            weight: 90,
            moves: vec![SubjectMove {
                move_ref: NamedResource {
                    name: "tackle".to_string(),
                },
            }],
            types: vec![SubjectType {
                slot: 1,
                type_ref: NamedResource {
                    name: "water".to_string(),
                },
            }],
            sprites: Sprites { other },
            cries: Cries {
                latest: Some("https://cry/7.ogg".to_string()),
            },
        }
    }

    fn selection(id: &str, type_name: &str) -> MoveSelection {
        MoveSelection {
            identifier: id.to_string(),
            display_name: crate::core::format::format_move_name(id),
            elemental_type: Some(type_name.to_string()),
            damage: None,
        }
    }

    #[test]
    fn test_finalize_without_subject_is_incomplete() {
        let mut builder = CardModelBuilder::new();
        let err = builder.finalize(60, Some(20), None).unwrap_err();
        match err {
            CardError::IncompleteModel { missing } => {
                assert_eq!(missing, vec!["subject_name", "sprite_url", "primary_type"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(builder.model().hit_points, None);
    }

    #[test]
    fn test_subject_loaded_populates_immediate_fields() {
        let mut builder = CardModelBuilder::new();
        builder.on_subject_loaded(&squirtle());
        let model = builder.model();
        assert_eq!(model.subject_name.as_deref(), Some("Squirtle"));
        assert_eq!(model.primary_type.as_deref(), Some("water"));
        assert_eq!(model.sprite_url.as_deref(), Some("https://img/7.png"));
        assert_eq!(model.cry_url.as_deref(), Some("https://cry/7.ogg"));
        assert_eq!(model.description, None);
    }

    #[test]
    fn test_description_fallback_only_without_english_entry() {
        let mut builder = CardModelBuilder::new();
        builder.on_subject_loaded(&squirtle());
        builder.on_description_loaded(&SpeciesPayload {
            name: "squirtle".to_string(),
            flavor_text_entries: vec![FlavorTextEntry {
                flavor_text: "Carapuce".to_string(),
                language: NamedResource {
                    name: "fr".to_string(),
                },
            }],
        });
        assert_eq!(builder.model().description.as_deref(), Some(DESCRIPTION_FALLBACK));
    }

    #[test]
    fn test_finalize_attaches_damage_to_occupied_slots() {
        let mut builder = CardModelBuilder::new();
        builder.on_subject_loaded(&squirtle());
        let water_gun = selection("water-gun", "water");
        builder.sync_moves([(Slot::Primary, &water_gun)]);

        let card = builder.finalize(60, Some(40), Some(90)).unwrap();
        assert_eq!(card.hit_points, 60);
        assert_eq!(card.moves.len(), 1);
        assert_eq!(card.moves[&Slot::Primary].damage, Some(40));
        assert_eq!(card.height_display, "1'8\"");
        assert_eq!(card.weight_display, "3.2 lbs");
        assert_eq!(card.raw_height, 5);
        assert_eq!(builder.model().raw_weight, Some(90));
    }

    #[test]
    fn test_finalize_requires_second_move_damage() {
        let mut builder = CardModelBuilder::new();
        builder.on_subject_loaded(&squirtle());
        let tackle = selection("tackle", "normal");
        let bite = selection("bite", "dark");
        builder.sync_moves([(Slot::Primary, &tackle), (Slot::Secondary, &bite)]);

        assert!(matches!(
            builder.finalize(60, Some(40), None),
            Err(CardError::Validation { .. })
        ));
        let card = builder.finalize(60, Some(40), Some(30)).unwrap();
        assert_eq!(card.moves[&Slot::Primary].damage, Some(40));
        assert_eq!(card.moves[&Slot::Secondary].damage, Some(30));
    }

    #[test]
    fn test_finalize_requires_first_move_damage_when_both_moves_present() {
        let mut builder = CardModelBuilder::new();
        builder.on_subject_loaded(&squirtle());
        let tackle = selection("tackle", "normal");
        let bite = selection("bite", "dark");
        builder.sync_moves([(Slot::Primary, &tackle), (Slot::Secondary, &bite)]);

        match builder.finalize(60, None, Some(30)).unwrap_err() {
            CardError::Validation { field, .. } => assert_eq!(field, "move1_damage"),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(builder.model().hit_points, None);

        // 只剩第一招時可以不填傷害
        builder.sync_moves([(Slot::Primary, &tackle)]);
        let card = builder.finalize(60, None, None).unwrap();
        assert_eq!(card.moves[&Slot::Primary].damage, None);
    }
}
