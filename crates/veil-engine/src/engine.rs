//! The Datafly loop: attribute selection, hierarchy-driven coarsening,
//! bounded suppression, and row reconstruction.

use std::collections::HashMap;

use tracing::{debug, info};

use veil_core::errors::EngineError;
use veil_core::models::{AnonymizationParams, Row, RunSummary};
use veil_core::traits::{Generalized, IHierarchy, ITableSink, ITableSource};
use veil_core::VeilResult;

use crate::frequency::FrequencyTable;

/// Datafly anonymization engine.
///
/// Owns one hierarchy per quasi-identifier, in the caller's QI order.
/// A single engine processes one table per call; there is no shared
/// mutable state between runs.
pub struct DataflyEngine {
    params: AnonymizationParams,
    hierarchies: Vec<Box<dyn IHierarchy>>,
}

impl std::fmt::Debug for DataflyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataflyEngine")
            .field("params", &self.params)
            .field("hierarchies", &self.hierarchies.len())
            .finish()
    }
}

impl DataflyEngine {
    /// Create an engine, validating k and the hierarchy wiring: one
    /// hierarchy per quasi-identifier, same order, matching attribute
    /// names.
    pub fn new(
        params: AnonymizationParams,
        hierarchies: Vec<Box<dyn IHierarchy>>,
    ) -> Result<Self, EngineError> {
        if params.k == 0 {
            return Err(EngineError::InvalidK { k: params.k });
        }
        if hierarchies.len() != params.quasi_identifiers.len() {
            return Err(EngineError::HierarchyCountMismatch {
                expected: params.quasi_identifiers.len(),
                actual: hierarchies.len(),
            });
        }
        for (name, hierarchy) in params.quasi_identifiers.iter().zip(&hierarchies) {
            if hierarchy.attribute() != name {
                return Err(EngineError::HierarchyAttributeMismatch {
                    expected: name.clone(),
                    actual: hierarchy.attribute().to_string(),
                });
            }
        }
        Ok(Self {
            params,
            hierarchies,
        })
    }

    pub fn k(&self) -> usize {
        self.params.k
    }

    pub fn quasi_identifiers(&self) -> &[String] {
        &self.params.quasi_identifiers
    }

    /// Anonymize `source` into `sink`.
    ///
    /// On success every written group has at least k rows, at most k rows
    /// were suppressed, and the output keeps the source row order. Any
    /// error aborts the run; whatever the sink already received is the
    /// caller's to discard.
    pub fn anonymize(
        &self,
        source: &dyn ITableSource,
        sink: &mut dyn ITableSink,
    ) -> VeilResult<RunSummary> {
        let schema = source.schema();

        // Resolve QI columns up front so a bad attribute name fails
        // before any row is touched.
        let mut qi_columns = Vec::with_capacity(self.params.quasi_identifiers.len());
        for name in &self.params.quasi_identifiers {
            qi_columns.push(schema.column(name)?);
        }

        let rows = source.rows();
        let mut frequency = FrequencyTable::build(rows, &qi_columns);
        info!(
            rows = rows.len(),
            groups = frequency.len(),
            k = self.params.k,
            "built frequency table"
        );

        let mut rounds = 0usize;
        loop {
            let violating = frequency.violating_mass(self.params.k);
            if violating <= self.params.k {
                break;
            }

            let position = frequency.widest_domain();
            let level = frequency.level(position);
            let attribute = &self.params.quasi_identifiers[position];
            debug!(
                round = rounds + 1,
                attribute = %attribute,
                level,
                violating,
                domain = frequency.domain_cardinality(position),
                "generalizing widest domain"
            );

            // One hierarchy lookup per distinct original value per round.
            let hierarchy = self.hierarchies[position].as_ref();
            let mut cache: HashMap<String, Generalized> = HashMap::new();
            let rewritten = frequency.apply_generalization(position, |value| {
                if let Some(hit) = cache.get(value) {
                    return Ok(hit.clone());
                }
                let generalized = hierarchy.generalize(value, level)?;
                cache.insert(value.to_string(), generalized.clone());
                Ok(generalized)
            })?;
            rounds += 1;

            if rewritten == 0 {
                // Every value of the chosen attribute already sits at its
                // root; the violation mass cannot shrink any further.
                return Err(EngineError::HierarchyExhausted {
                    attribute: attribute.clone(),
                }
                .into());
            }
        }

        let suppressed = frequency.suppress_below(self.params.k);
        debug_assert!(suppressed <= self.params.k);

        // Rewrite surviving rows in source order.
        sink.write_header(schema)?;
        let assignments = frequency.row_assignments();
        let mut output_rows = 0usize;
        for row in rows {
            let Some(tuple) = assignments.get(&row.index) else {
                continue;
            };
            let mut values = row.values.clone();
            for (&column, value) in qi_columns.iter().zip(tuple.iter()) {
                values[column] = value.clone();
            }
            sink.write_row(&Row::new(row.index, values))?;
            output_rows += 1;
        }
        sink.finish()?;

        let summary = RunSummary {
            input_rows: rows.len(),
            output_rows,
            suppressed_rows: suppressed,
            rounds,
            final_levels: self
                .params
                .quasi_identifiers
                .iter()
                .cloned()
                .zip(frequency.levels().iter().copied())
                .collect(),
        };
        info!(
            output_rows = summary.output_rows,
            suppressed = summary.suppressed_rows,
            rounds = summary.rounds,
            "anonymization complete"
        );
        Ok(summary)
    }
}
