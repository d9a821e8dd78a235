use crate::core::builder::CardModelBuilder;
use crate::core::coordinator::{DamageField, EnrichmentTicket, MoveOption, MoveSelectionCoordinator};
use crate::core::render::{render_card, CardView};
use crate::domain::model::{CardModel, RenderReadyCard, Slot, SpeciesPayload};
use crate::domain::ports::LookupClient;
use crate::utils::error::Result;
use crate::utils::validation::validate_submission;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};

enum Resolution {
    MoveType {
        ticket: EnrichmentTicket,
        result: Result<String>,
    },
    Description {
        generation: u64,
        result: Result<SpeciesPayload>,
    },
}

/// One card-building session.
///
/// Owns the move coordinator and the card model. Type and description
/// lookups run as tasks in a [`JoinSet`], so the session has to live inside
/// a tokio runtime. Results are applied by [`CardSession::poll_pending`] or
/// [`CardSession::settle`].
pub struct CardSession<C: LookupClient + 'static> {
    client: Arc<C>,
    coordinator: MoveSelectionCoordinator,
    builder: CardModelBuilder,
    generation: u64,
    snapshot: Option<RenderReadyCard>,
    lookups: JoinSet<Resolution>,
}

impl<C: LookupClient + 'static> CardSession<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            coordinator: MoveSelectionCoordinator::new(),
            builder: CardModelBuilder::new(),
            generation: 0,
            snapshot: None,
            lookups: JoinSet::new(),
        }
    }

    /// Looks up a creature. On failure the session keeps its previous state.
    pub async fn load_subject(&mut self, name: &str) -> Result<()> {
        let payload = self.client.lookup_subject(name).await?;

        self.generation += 1;
        self.snapshot = None;
        self.coordinator
            .on_subject_loaded(payload.move_identifiers().map(str::to_string));
        self.builder.on_subject_loaded(&payload);
        tracing::info!(
            "📥 Loaded {} (#{}) with {} moves",
            payload.name,
            payload.id,
            self.coordinator.pool().len()
        );

        // 圖鑑說明另外查，不阻塞其他欄位
        let client = Arc::clone(&self.client);
        let generation = self.generation;
        let species_name = name.to_string();
        self.lookups.spawn(async move {
            let result = client.lookup_description(&species_name).await;
            Resolution::Description { generation, result }
        });

        Ok(())
    }

    pub fn select_move(&mut self, slot: Slot, value: Option<&str>) -> Result<()> {
        let ticket = self.coordinator.on_slot_changed(slot, value)?;
        self.builder.sync_moves(self.coordinator.selections());

        if let Some(ticket) = ticket {
            let client = Arc::clone(&self.client);
            self.lookups.spawn(async move {
                let result = client.lookup_move_type(&ticket.identifier).await;
                Resolution::MoveType { ticket, result }
            });
        }
        Ok(())
    }

    pub fn options(&self, slot: Slot) -> Vec<MoveOption> {
        self.coordinator.options(slot)
    }

    pub fn selected(&self, slot: Slot) -> Option<&str> {
        self.coordinator.value(slot)
    }

    pub fn damage_field(&self) -> &DamageField {
        self.coordinator.damage_field()
    }

    /// Fills the slot-2 damage input. Clearing slot 2 empties it again.
    pub fn set_move2_damage(&mut self, value: Option<u16>) {
        self.coordinator.set_damage_value(value);
    }

    pub fn model(&self) -> &CardModel {
        self.builder.model()
    }

    pub fn snapshot(&self) -> Option<&RenderReadyCard> {
        self.snapshot.as_ref()
    }

    pub fn cry_url(&self) -> Option<&str> {
        self.builder.model().cry_url.as_deref()
    }

    pub fn outstanding(&self) -> usize {
        self.lookups.len()
    }

    /// Applies whatever lookups have already finished. Never waits.
    pub fn poll_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(joined) = self.lookups.try_join_next() {
            self.apply_joined(joined);
            applied += 1;
        }
        applied
    }

    /// Waits until every spawned lookup has finished, including ones that
    /// panicked or were cancelled.
    pub async fn settle(&mut self) {
        while let Some(joined) = self.lookups.join_next().await {
            self.apply_joined(joined);
        }
    }

    /// Submit: waits for pending lookups, checks form constraints and
    /// finalizes the card. Move 2's damage comes from the slot-2 damage field.
    pub async fn submit(
        &mut self,
        hit_points: u16,
        move1_damage: Option<u16>,
    ) -> Result<RenderReadyCard> {
        self.settle().await;

        let move2_damage = self.coordinator.damage_field().value;
        if self.builder.has_subject() {
            let both_moves = Slot::ALL.iter().all(|slot| self.coordinator.value(*slot).is_some());
            validate_submission(
                hit_points,
                move1_damage,
                move2_damage,
                both_moves,
                self.coordinator.damage_field().required,
            )?;
        }

        let card = self.builder.finalize(hit_points, move1_damage, move2_damage)?;
        tracing::info!("🃏 Card ready for {}", card.subject_name);
        self.snapshot = Some(card.clone());
        Ok(card)
    }

    pub fn render(&self) -> Option<CardView> {
        self.snapshot.as_ref().map(render_card)
    }

    fn apply_joined(&mut self, joined: std::result::Result<Resolution, JoinError>) {
        match joined {
            Ok(resolution) => self.apply(resolution),
            // 查詢任務掛掉時屬性維持未定，渲染時退回 unknown
            Err(e) => tracing::warn!("⚠️ Lookup task did not finish: {}", e),
        }
    }

    fn apply(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::MoveType { ticket, result } => {
                if self.coordinator.apply_enrichment(&ticket, result) {
                    self.builder.sync_moves(self.coordinator.selections());
                }
            }
            Resolution::Description { generation, result } => {
                if generation != self.generation {
                    tracing::debug!("Dropping description from an earlier lookup");
                    return;
                }
                match result {
                    Ok(species) => self.builder.on_description_loaded(&species),
                    Err(e) => tracing::warn!("⚠️ Description lookup failed: {}", e),
                }
            }
        }
    }
}
