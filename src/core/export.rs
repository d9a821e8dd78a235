use crate::core::render::CardView;
use crate::domain::ports::{LookupClient, Rasterizer, Storage};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    Png,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Json => "json",
        }
    }
}

fn file_stem(subject_name: &str) -> String {
    subject_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect()
}

/// `Squirtle` -> `Squirtle_card.png`
pub fn export_file_name(subject_name: &str, format: ExportFormat) -> String {
    format!("{}_card.{}", file_stem(subject_name), format.extension())
}

pub fn cry_file_name(subject_name: &str) -> String {
    format!("{}_cry.ogg", file_stem(subject_name))
}

/// Turns a rendered card into files. Export only runs when asked.
pub struct ExportPipeline<C: LookupClient, S: Storage, R: Rasterizer> {
    client: Arc<C>,
    storage: S,
    rasterizer: R,
}

impl<C: LookupClient, S: Storage, R: Rasterizer> ExportPipeline<C, S, R> {
    pub fn new(client: Arc<C>, storage: S, rasterizer: R) -> Self {
        Self {
            client,
            storage,
            rasterizer,
        }
    }

    /// Writes the card and returns the file name inside the storage.
    pub async fn export(&self, view: &CardView, format: ExportFormat) -> Result<String> {
        let file_name = export_file_name(&view.name, format);

        let data = match format {
            ExportFormat::Png => {
                // 先下載外部圖片，避免跨來源圖片讓輸出失敗
                let sprite = match self.client.fetch_asset(&view.sprite_url).await {
                    Ok(bytes) => Some(bytes),
                    Err(e) => {
                        tracing::warn!("⚠️ Sprite download failed, exporting without it: {}", e);
                        None
                    }
                };
                self.rasterizer.rasterize(view, sprite.as_deref())?
            }
            ExportFormat::Json => serde_json::to_vec_pretty(view)?,
        };

        tracing::debug!("Writing {} ({} bytes) to storage", file_name, data.len());
        self.storage.write_file(&file_name, &data).await?;
        Ok(file_name)
    }

    /// Downloads the cry audio. Returns `None` when the creature has no cry.
    pub async fn save_cry(&self, view: &CardView) -> Result<Option<String>> {
        let Some(url) = view.cry_url.as_deref() else {
            tracing::info!("{} has no cry to save", view.name);
            return Ok(None);
        };

        let audio = self.client.fetch_asset(url).await?;
        let file_name = cry_file_name(&view.name);
        self.storage.write_file(&file_name, &audio).await?;
        Ok(Some(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{SpeciesPayload, SubjectPayload};
    use crate::utils::error::CardError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.lock().await.get(path).cloned().ok_or_else(|| {
                CardError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct AssetClient {
        assets: HashMap<String, Vec<u8>>,
    }

    #[async_trait]
    impl LookupClient for AssetClient {
        async fn lookup_subject(&self, name: &str) -> Result<SubjectPayload> {
            Err(CardError::NotFound {
                resource: "pokemon".to_string(),
                name: name.to_string(),
            })
        }

        async fn lookup_move_type(&self, identifier: &str) -> Result<String> {
            Err(CardError::NotFound {
                resource: "move".to_string(),
                name: identifier.to_string(),
            })
        }

        async fn lookup_description(&self, name: &str) -> Result<SpeciesPayload> {
            Err(CardError::NotFound {
                resource: "pokemon-species".to_string(),
                name: name.to_string(),
            })
        }

        async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>> {
            self.assets.get(url).cloned().ok_or_else(|| CardError::Provider {
                status: 404,
                url: url.to_string(),
            })
        }
    }

    /// Records whether a sprite was handed over.
    struct RecordingRasterizer;

    impl Rasterizer for RecordingRasterizer {
        fn rasterize(&self, _view: &CardView, sprite: Option<&[u8]>) -> Result<Vec<u8>> {
            Ok(match sprite {
                Some(bytes) => [b"with:".as_slice(), bytes].concat(),
                None => b"without".to_vec(),
            })
        }
    }

    fn view(cry_url: Option<&str>) -> CardView {
        CardView {
            name: "Squirtle".to_string(),
            hp: "60".to_string(),
            type_name: "water".to_string(),
            type_icon: "images/types/water.svg".to_string(),
            sprite_url: "https://img/7.png".to_string(),
            id: "7".to_string(),
            height: "1'8\"".to_string(),
            weight: "3.2 lbs".to_string(),
            entry: String::new(),
            moves: vec![],
            primary_color: "#87CEEB".to_string(),
            secondary_color: "#7BB8D3".to_string(),
            cry_url: cry_url.map(str::to_string),
        }
    }

    fn pipeline(
        assets: &[(&str, &[u8])],
        storage: MockStorage,
    ) -> ExportPipeline<AssetClient, MockStorage, RecordingRasterizer> {
        let client = AssetClient {
            assets: assets
                .iter()
                .map(|(url, bytes)| (url.to_string(), bytes.to_vec()))
                .collect(),
        };
        ExportPipeline::new(Arc::new(client), storage, RecordingRasterizer)
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Squirtle", ExportFormat::Png), "Squirtle_card.png");
        assert_eq!(export_file_name("Mr-Mime", ExportFormat::Json), "Mr-Mime_card.json");
        assert_eq!(export_file_name("a/b", ExportFormat::Png), "a_b_card.png");
    }

    #[tokio::test]
    async fn test_png_export_fetches_sprite() {
        let storage = MockStorage::default();
        let pipeline = pipeline(&[("https://img/7.png", b"SPRITE")], storage.clone());

        let file_name = pipeline.export(&view(None), ExportFormat::Png).await.unwrap();

        assert_eq!(file_name, "Squirtle_card.png");
        assert_eq!(storage.get_file(&file_name).await.unwrap(), b"with:SPRITE");
    }

    #[tokio::test]
    async fn test_png_export_survives_sprite_failure() {
        let storage = MockStorage::default();
        let pipeline = pipeline(&[], storage.clone());

        let file_name = pipeline.export(&view(None), ExportFormat::Png).await.unwrap();
        assert_eq!(storage.get_file(&file_name).await.unwrap(), b"without");
    }

    #[tokio::test]
    async fn test_json_export_serializes_view() {
        let storage = MockStorage::default();
        let pipeline = pipeline(&[], storage.clone());

        let file_name = pipeline.export(&view(None), ExportFormat::Json).await.unwrap();
        let data = storage.get_file(&file_name).await.unwrap();
        let parsed: CardView = serde_json::from_slice(&data).unwrap();
        assert_eq!(parsed, view(None));
    }

    #[tokio::test]
    async fn test_save_cry() {
        let storage = MockStorage::default();
        let pipeline = pipeline(&[("https://cry/7.ogg", b"OggS")], storage.clone());

        let saved = pipeline.save_cry(&view(Some("https://cry/7.ogg"))).await.unwrap();
        assert_eq!(saved.as_deref(), Some("Squirtle_cry.ogg"));
        assert_eq!(storage.get_file("Squirtle_cry.ogg").await.unwrap(), b"OggS");

        assert_eq!(pipeline.save_cry(&view(None)).await.unwrap(), None);
    }
}
