//! Application state.

use std::sync::Arc;

use vpub_publisher::{PublishPipeline, SimulatedPublisher};
use vpub_seo::{CategoryProfileCatalog, ContentSynthesizer, SeoResult};

use crate::config::ApiConfig;
use crate::services::UploadOrchestrator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub synthesizer: Arc<ContentSynthesizer>,
    pub pipeline: Arc<PublishPipeline>,
    pub orchestrator: UploadOrchestrator,
}

impl AppState {
    /// Build state from configuration: load the catalog, apply content
    /// limits and wire the simulated publisher into the pipeline.
    pub fn new(config: ApiConfig) -> SeoResult<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => CategoryProfileCatalog::load(path)?,
            None => CategoryProfileCatalog::builtin(),
        };

        let synthesizer =
            ContentSynthesizer::new(Arc::new(catalog)).with_limits(config.content_limits)?;

        let publisher = SimulatedPublisher::new(config.publish_latency);
        let pipeline =
            PublishPipeline::new(Arc::new(publisher)).with_config(config.pipeline_config());

        Ok(Self::from_parts(config, synthesizer, pipeline))
    }

    /// Assemble state from prebuilt components.
    pub fn from_parts(
        config: ApiConfig,
        synthesizer: ContentSynthesizer,
        pipeline: PublishPipeline,
    ) -> Self {
        let synthesizer = Arc::new(synthesizer);
        let pipeline = Arc::new(pipeline);
        let orchestrator = UploadOrchestrator::new(Arc::clone(&synthesizer), Arc::clone(&pipeline));

        Self {
            config,
            synthesizer,
            pipeline,
            orchestrator,
        }
    }
}
