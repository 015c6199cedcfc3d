// Adapters layer: concrete implementations for external systems (http feed,
// filesystem storage, template rendering, archive file).

pub mod archive;
pub mod http;
pub mod render;
pub mod storage;
