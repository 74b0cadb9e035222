use crate::engine::MutationEngine;
use crate::engines::binary::BinaryHarnessEngine;
use crate::engines::streaming::StreamingReportEngine;
use crate::engines::structured::StructuredReportEngine;
use crate::types::EngineKind;
use crate::types::config::ExperimentConfig;

/// Registry for the engine families available to a run
pub struct EngineRegistry {
    engines: Vec<Box<dyn MutationEngine>>,
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self {
            engines: Vec::new(),
        }
    }

    /// Register one engine per configured `[engines.*]` section that some
    /// enabled target uses.
    pub fn from_config(config: &ExperimentConfig) -> Self {
        let mut registry = Self::new();
        let used = |kind: EngineKind| config.targets.iter().any(|t| t.engine == kind);
        if let Some(settings) = config.engines.binary.clone().filter(|_| used(EngineKind::Binary)) {
            registry.register(BinaryHarnessEngine::new(settings));
        }
        if let Some(settings) = config
            .engines
            .streaming
            .clone()
            .filter(|_| used(EngineKind::Streaming))
        {
            registry.register(StreamingReportEngine::new(settings));
        }
        if let Some(settings) = config
            .engines
            .structured
            .clone()
            .filter(|_| used(EngineKind::Structured))
        {
            registry.register(StructuredReportEngine::new(settings));
        }
        registry
    }

    /// Register an engine. A later registration for the same kind replaces
    /// the earlier one.
    pub fn register<T: MutationEngine + 'static>(&mut self, engine: T) {
        self.engines.retain(|e| e.kind() != engine.kind());
        self.engines.push(Box::new(engine));
    }

    /// Get the engine for a kind
    pub fn get(&self, kind: EngineKind) -> Option<&dyn MutationEngine> {
        self.engines
            .iter()
            .find(|engine| engine.kind() == kind)
            .map(|engine| engine.as_ref())
    }

    /// Get all registered engine names
    pub fn all_engines(&self) -> Vec<&str> {
        self.engines.iter().map(|engine| engine.name()).collect()
    }

    /// Whether any registered engine reads the suite from the staged input file
    pub fn any_requires_staging(&self) -> bool {
        self.engines.iter().any(|engine| engine.requires_staged_input())
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}
