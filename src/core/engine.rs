use crate::core::export::{ExportFormat, ExportPipeline};
use crate::core::render::CardView;
use crate::core::session::CardSession;
use crate::domain::model::{RenderReadyCard, Slot};
use crate::domain::ports::{LookupClient, Rasterizer, Storage};
use crate::utils::error::{CardError, Result};
use std::sync::Arc;

/// Everything the form collects for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRequest {
    pub name: String,
    pub move1: Option<String>,
    pub move2: Option<String>,
    pub hit_points: u16,
    pub move1_damage: Option<u16>,
    pub move2_damage: Option<u16>,
    pub format: ExportFormat,
    pub save_cry: bool,
}

#[derive(Debug, Clone)]
pub struct CardOutcome {
    pub card: RenderReadyCard,
    pub view: CardView,
    pub card_file: String,
    pub cry_file: Option<String>,
}

pub struct CardEngine<C: LookupClient + 'static, S: Storage, R: Rasterizer> {
    client: Arc<C>,
    exporter: ExportPipeline<C, S, R>,
}

impl<C: LookupClient + 'static, S: Storage, R: Rasterizer> CardEngine<C, S, R> {
    pub fn new(client: C, storage: S, rasterizer: R) -> Self {
        let client = Arc::new(client);
        Self {
            exporter: ExportPipeline::new(Arc::clone(&client), storage, rasterizer),
            client,
        }
    }

    pub fn session(&self) -> CardSession<C> {
        CardSession::new(Arc::clone(&self.client))
    }

    /// Loads the creature and returns the move options for slot 1.
    pub async fn list_moves(&self, name: &str) -> Result<Vec<(String, String)>> {
        let mut session = self.session();
        session.load_subject(name).await?;
        Ok(session
            .options(Slot::Primary)
            .into_iter()
            .map(|o| (o.identifier, o.display_name))
            .collect())
    }

    pub async fn run(&self, request: &CardRequest) -> Result<CardOutcome> {
        tracing::info!("🔎 Looking up {}...", request.name);
        let mut session = self.session();
        session.load_subject(&request.name).await?;

        tracing::info!("🎯 Selecting moves...");
        session.select_move(Slot::Primary, request.move1.as_deref())?;
        session.select_move(Slot::Secondary, request.move2.as_deref())?;
        session.set_move2_damage(request.move2_damage);

        tracing::info!("📝 Submitting card...");
        let card = session.submit(request.hit_points, request.move1_damage).await?;
        let view = session.render().ok_or_else(|| CardError::IncompleteModel {
            missing: vec!["snapshot"],
        })?;
        tracing::debug!("Card view: {:?}", view);

        tracing::info!("🖼️ Exporting card...");
        let card_file = self.exporter.export(&view, request.format).await?;

        let cry_file = if request.save_cry {
            self.exporter.save_cry(&view).await?
        } else {
            None
        };

        Ok(CardOutcome {
            card,
            view,
            card_file,
            cry_file,
        })
    }
}
