pub mod menu_pipeline;

pub use menu_pipeline::MenuPipeline;
