//! The reload pass.
//!
//! [`RuleGenerator::apply`] runs one complete pass against a host-owned
//! [`RuleTableBuilder`]:
//!
//! 1. Reset the id allocator and resolve the catalysts.
//! 2. Enumerate descriptor documents under the configured category.
//! 3. Parse each document and synthesize one crafting rule per entry. A
//!    document that fails to read, parse, or resolve is reported and skipped.
//! 4. Amplify every smelting rule already in the table.
//!
//! Explicit rules therefore always receive the lowest ids of the pass.
//! Failures of the source itself, of catalyst resolution, or of the table are
//! fatal and returned as [`GenerateError`].

use std::io::Read;
use transmute_core::id::{IdAllocator, Identifier, IdentifierError};
use transmute_core::item::IngredientSpec;
use transmute_core::registry::TypeResolver;
use transmute_core::synth::Synthesizer;
use transmute_core::table::{RuleTableBuilder, RuleTableError};

use crate::config::GeneratorConfig;
use crate::diagnostics::{DiagnosticsSink, TracingDiagnostics};
use crate::loader::DataLoadError;
use crate::parser::{DescriptorSpec, parse_descriptors};
use crate::source::DescriptorSource;

/// Errors that abort a whole pass.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid generator configuration: {0}")]
    Config(#[from] IdentifierError),

    #[error("amplification {amplification} is outside 1..={max_amount}")]
    Amplification { amplification: u32, max_amount: u32 },

    #[error("failed to resolve catalysts: {0}")]
    Catalyst(#[source] DataLoadError),

    #[error("failed to enumerate descriptor documents: {0}")]
    Enumerate(#[source] DataLoadError),

    #[error(transparent)]
    Sink(#[from] RuleTableError),
}

/// A document left out of a pass, and why.
#[derive(Debug)]
pub struct SkippedDocument {
    pub resource: Identifier,
    pub error: DataLoadError,
}

/// Outcome of one [`RuleGenerator::apply`] pass.
#[derive(Debug, Default)]
pub struct PassReport {
    /// Descriptor documents enumerated, including skipped ones.
    pub documents: usize,
    /// Rules synthesized from descriptor entries.
    pub explicit_rules: usize,
    /// Rules derived from the smelting category.
    pub derived_rules: usize,
    pub skipped: Vec<SkippedDocument>,
}

impl PassReport {
    pub fn total_rules(&self) -> usize {
        self.explicit_rules + self.derived_rules
    }

    /// No document was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn was_skipped(&self, resource: &Identifier) -> bool {
        self.skipped.iter().any(|s| &s.resource == resource)
    }
}

/// Read a whole document, closing the stream before returning.
fn read_document<S: DescriptorSource + ?Sized>(
    source: &S,
    resource: &Identifier,
) -> Result<Vec<u8>, DataLoadError> {
    let mut reader = source.open(resource)?;
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| DataLoadError::Read {
            origin: resource.to_string(),
            source: e,
        })?;
    Ok(bytes)
}

/// Derives alchemical crafting rules from descriptor documents and the
/// smelting category.
#[derive(Debug)]
pub struct RuleGenerator<D = TracingDiagnostics> {
    config: GeneratorConfig,
    ids: IdAllocator,
    diagnostics: D,
}

impl RuleGenerator<TracingDiagnostics> {
    pub fn new(config: GeneratorConfig) -> Result<Self, GenerateError> {
        Self::with_diagnostics(config, TracingDiagnostics)
    }
}

impl<D: DiagnosticsSink> RuleGenerator<D> {
    pub fn with_diagnostics(config: GeneratorConfig, diagnostics: D) -> Result<Self, GenerateError> {
        if !config.amplification_in_range() {
            return Err(GenerateError::Amplification {
                amplification: config.amplification,
                max_amount: config.max_amount,
            });
        }
        let ids = config.allocator()?;
        Ok(Self {
            config,
            ids,
            diagnostics,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> D {
        self.diagnostics
    }

    /// Number of rule ids issued by the current (or last) pass.
    pub fn issued(&self) -> u64 {
        self.ids.issued()
    }

    /// Run one full pass, writing into `table`.
    pub fn apply<S, R>(
        &mut self,
        source: &S,
        resolver: &R,
        table: &mut RuleTableBuilder,
    ) -> Result<PassReport, GenerateError>
    where
        S: DescriptorSource + ?Sized,
        R: TypeResolver + ?Sized,
    {
        self.ids.reset();
        let catalysts = self
            .config
            .catalysts(resolver)
            .map_err(GenerateError::Catalyst)?;

        let config = &self.config;
        let resources = source
            .find_resources(&config.category, &|path: &str| config.accepts(path))
            .map_err(GenerateError::Enumerate)?;

        let mut synth = Synthesizer::new(catalysts, config.amplification, &mut self.ids);
        let mut report = PassReport {
            documents: resources.len(),
            ..PassReport::default()
        };

        for resource in resources {
            let specs = read_document(source, &resource).and_then(|bytes| {
                parse_descriptors(
                    &bytes,
                    &resource,
                    resolver,
                    &config.default_namespace,
                    config.max_amount,
                )
            });
            let specs: Vec<DescriptorSpec> = match specs {
                Ok(specs) => specs,
                Err(error) => {
                    self.diagnostics
                        .error("failed to read alchemical descriptors", &resource, &error);
                    report.skipped.push(SkippedDocument { resource, error });
                    continue;
                }
            };

            for entry in &specs {
                synth.add_alchemical(table, entry.output, IngredientSpec::Type(entry.input), entry.amount)?;
            }
            tracing::debug!(resource = %resource, rules = specs.len(), "synthesized descriptor rules");
            report.explicit_rules += specs.len();
        }

        report.derived_rules = synth.add_all_smelting(table)?;

        tracing::info!(
            documents = report.documents,
            skipped = report.skipped.len(),
            explicit = report.explicit_rules,
            derived = report.derived_rules,
            "alchemical rule pass complete",
        );
        Ok(report)
    }
}
