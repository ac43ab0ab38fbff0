use crate::adapters::storage::LocalStorage;
use crate::adapters::xpath::XmlDocument;
use crate::config::RunSettings;
use crate::core::feed::{FeedGenerator, FeedStats};
use crate::core::writer::FeedWriter;
use crate::domain::ports::SourceProfile;
use crate::utils::error::Result;
use std::path::Path;

/// Converts one input page into one feed.
pub struct ConversionEngine<P: SourceProfile> {
    profile: P,
    settings: RunSettings,
    storage: LocalStorage,
}

impl<P: SourceProfile> ConversionEngine<P> {
    pub fn new(profile: P, settings: RunSettings, storage: LocalStorage) -> Self {
        Self {
            profile,
            settings,
            storage,
        }
    }

    pub fn run(&self, input: &Path) -> Result<FeedStats> {
        tracing::info!(
            "Converting {} with profile {} (reference year {})",
            input.display(),
            self.profile.name(),
            self.settings.reference_year
        );

        // Extract
        let content = self.storage.read_document(input)?;
        let document = XmlDocument::parse(&content)?;
        let tree = document.tree_with_namespaces(&self.profile.namespaces());
        tracing::debug!("document parsed");

        // Transform + load, streamed day by day
        let writer = FeedWriter::new(self.storage.open_output()?);
        let stats = FeedGenerator::new(&self.profile, self.settings.reference_year)
            .generate(&tree, writer)?;

        tracing::info!(
            "✅ {} days ({} closed), {} categories, {} meals",
            stats.days,
            stats.closed_days,
            stats.categories,
            stats.meals
        );
        Ok(stats)
    }
}
