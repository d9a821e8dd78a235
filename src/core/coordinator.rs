use crate::core::format::format_move_name;
use crate::domain::model::{MovePool, MoveSelection, Slot, UNKNOWN_TYPE};
use crate::utils::error::{CardError, Result};

pub const MOVE2_DAMAGE_REQUIRED_LABEL: &str = "Move #2 Damage (required, from 10 to 150):";
pub const MOVE2_DAMAGE_OPTIONAL_LABEL: &str = "Move #2 Damage (optional, from 10 to 150):";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOption {
    pub identifier: String,
    pub display_name: String,
}

/// The damage input tied to slot 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageField {
    pub required: bool,
    pub label: &'static str,
    pub value: Option<u16>,
}

impl Default for DamageField {
    fn default() -> Self {
        Self {
            required: false,
            label: MOVE2_DAMAGE_OPTIONAL_LABEL,
            value: None,
        }
    }
}

/// Handle for one outstanding type lookup. Only the ticket carrying the
/// slot's current sequence number is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentTicket {
    pub slot: Slot,
    pub seq: u64,
    pub identifier: String,
}

#[derive(Debug, Default)]
pub struct MoveSelectionCoordinator {
    pool: MovePool,
    selections: [Option<MoveSelection>; 2],
    seq: [u64; 2],
    damage_field: DamageField,
}

impl MoveSelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新的寶可夢：重設招式池與兩個欄位，並讓所有進行中的查詢失效
    pub fn on_subject_loaded<I, S>(&mut self, moves: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pool = MovePool::new(moves);
        for slot in Slot::ALL {
            self.clear_slot(slot);
        }
        tracing::debug!("Move pool reset with {} moves", self.pool.len());
    }

    pub fn pool(&self) -> &MovePool {
        &self.pool
    }

    pub fn value(&self, slot: Slot) -> Option<&str> {
        self.selections[slot.index()]
            .as_ref()
            .map(|s| s.identifier.as_str())
    }

    pub fn selection(&self, slot: Slot) -> Option<&MoveSelection> {
        self.selections[slot.index()].as_ref()
    }

    pub fn damage_field(&self) -> &DamageField {
        &self.damage_field
    }

    pub fn current_seq(&self, slot: Slot) -> u64 {
        self.seq[slot.index()]
    }

    /// Pool minus whatever the other slot holds, by raw identifier.
    pub fn options(&self, slot: Slot) -> Vec<MoveOption> {
        let excluded = self.value(slot.other());
        self.pool
            .iter()
            .filter(|id| Some(*id) != excluded)
            .map(|id| MoveOption {
                identifier: id.to_string(),
                display_name: format_move_name(id),
            })
            .collect()
    }

    /// Picker change handler. Returns a ticket when a type lookup must be issued.
    pub fn on_slot_changed(
        &mut self,
        slot: Slot,
        new_value: Option<&str>,
    ) -> Result<Option<EnrichmentTicket>> {
        let new_value = new_value.filter(|v| !v.is_empty());

        if let Some(identifier) = new_value {
            if !self.pool.contains(identifier) {
                return Err(CardError::UnknownMove {
                    identifier: identifier.to_string(),
                });
            }
        }

        // 另一欄位若與新值相同則清空
        let other = slot.other();
        if new_value.is_some() && self.value(other) == new_value {
            tracing::debug!("{} reset because it collided with {}", other, slot);
            self.clear_slot(other);
        }

        let Some(identifier) = new_value else {
            self.clear_slot(slot);
            return Ok(None);
        };

        if self.value(slot) == Some(identifier) {
            return Ok(None);
        }

        let seq = self.bump(slot);
        self.selections[slot.index()] = Some(MoveSelection {
            identifier: identifier.to_string(),
            display_name: format_move_name(identifier),
            elemental_type: None,
            damage: None,
        });
        if slot == Slot::Secondary {
            self.damage_field.required = true;
            self.damage_field.label = MOVE2_DAMAGE_REQUIRED_LABEL;
        }

        Ok(Some(EnrichmentTicket {
            slot,
            seq,
            identifier: identifier.to_string(),
        }))
    }

    /// Writes the looked-up type. A failed lookup becomes `"unknown"`.
    /// Returns false when the ticket is stale.
    pub fn apply_enrichment(
        &mut self,
        ticket: &EnrichmentTicket,
        result: Result<String>,
    ) -> bool {
        if ticket.seq != self.current_seq(ticket.slot) {
            tracing::debug!(
                "Dropping stale type for {} '{}' (seq {} < {})",
                ticket.slot,
                ticket.identifier,
                ticket.seq,
                self.current_seq(ticket.slot)
            );
            return false;
        }

        let Some(selection) = self.selections[ticket.slot.index()].as_mut() else {
            return false;
        };

        let elemental_type = match result {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!("Type lookup for '{}' failed: {}", ticket.identifier, e);
                UNKNOWN_TYPE.to_string()
            }
        };
        tracing::debug!("{} '{}' is {}", ticket.slot, ticket.identifier, elemental_type);
        selection.elemental_type = Some(elemental_type);
        true
    }

    pub fn set_damage_value(&mut self, value: Option<u16>) {
        self.damage_field.value = value;
    }

    pub fn selections(&self) -> impl Iterator<Item = (Slot, &MoveSelection)> {
        Slot::ALL
            .into_iter()
            .filter_map(move |slot| self.selection(slot).map(|s| (slot, s)))
    }

    fn bump(&mut self, slot: Slot) -> u64 {
        self.seq[slot.index()] += 1;
        self.seq[slot.index()]
    }

    fn clear_slot(&mut self, slot: Slot) {
        self.bump(slot);
        self.selections[slot.index()] = None;
        if slot == Slot::Secondary {
            self.damage_field = DamageField::default();
        }
    }
}
