pub mod cache;
pub mod decode;
pub mod loader;

pub use loader::AssetLoader;
