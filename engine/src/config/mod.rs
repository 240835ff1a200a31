// Engine configuration module
pub mod settings;

pub use settings::{AnalysisSettings, CandleSettings, EngineSettings, LinkSettings};
