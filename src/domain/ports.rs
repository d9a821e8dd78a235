use crate::core::render::CardView;
use crate::domain::model::{SpeciesPayload, SubjectPayload};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait LookupClient: Send + Sync {
    async fn lookup_subject(&self, name: &str) -> Result<SubjectPayload>;
    async fn lookup_move_type(&self, identifier: &str) -> Result<String>;
    async fn lookup_description(&self, name: &str) -> Result<SpeciesPayload>;
    async fn fetch_asset(&self, url: &str) -> Result<Vec<u8>>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait Rasterizer: Send + Sync {
    /// 把卡片畫成 PNG，`sprite` 為已下載的圖片原始位元組
    fn rasterize(&self, view: &CardView, sprite: Option<&[u8]>) -> Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn user_agent(&self) -> &str;
}
