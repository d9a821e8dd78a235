// Adapters layer: concrete implementations of the domain ports (http, storage, raster).

pub mod http;
pub mod raster;
pub mod storage;

pub use http::PokeApiClient;
pub use raster::PngRasterizer;
pub use storage::LocalStorage;
