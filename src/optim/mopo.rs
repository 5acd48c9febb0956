//! MOPO archive: the running record of the best-ever plan per objective.

use log::debug;
use serde::{Deserialize, Serialize};

use super::plan::Candidate;

/// One appended archive entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MopoEntry {
    /// The score that earned the append (one objective, or the aggregate).
    pub score: f64,
    /// The candidate that scored it.
    pub candidate: Candidate,
}

/// Append-only best-seen sequences: one per objective plus one for the
/// aggregate. Sequences never regress; the last entry of a sequence is the
/// best plan ever seen for that objective. Reporting only — the archive never
/// feeds back into the search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MopoArchive {
    objective_count: usize,
    sequences: Vec<Vec<MopoEntry>>,
}

impl MopoArchive {
    /// Empty archive for `objective_count` objectives.
    pub fn new(objective_count: usize) -> Self {
        Self {
            objective_count,
            sequences: vec![Vec::new(); objective_count + 1],
        }
    }

    /// The append-only sequence for objective `m`.
    pub fn objective_sequence(&self, m: usize) -> &[MopoEntry] {
        &self.sequences[m]
    }

    /// The append-only sequence for the aggregate score.
    pub fn aggregate_sequence(&self) -> &[MopoEntry] {
        &self.sequences[self.objective_count]
    }

    /// Best-ever entry for objective `m`, if any generation has been observed.
    pub fn best(&self, m: usize) -> Option<&MopoEntry> {
        self.sequences[m].last()
    }

    /// Total entries across all sequences.
    pub fn total_entries(&self) -> usize {
        self.sequences.iter().map(Vec::len).sum()
    }

    /// Fold a generation's retained population into the archive.
    ///
    /// The first call bootstraps every sequence with the population best. On
    /// later calls the population best is appended when it is no worse than
    /// the incumbent (non-strict, so ties extend the sequence); otherwise the
    /// sequence is left unchanged.
    pub fn update(&mut self, population: &[Candidate]) {
        if population.is_empty() {
            return;
        }

        for m in 0..=self.objective_count {
            let score_of = |candidate: &Candidate| {
                if m < self.objective_count {
                    candidate.objectives[m]
                } else {
                    candidate.aggregate
                }
            };

            let best = population
                .iter()
                .min_by(|a, b| score_of(a).total_cmp(&score_of(b)))
                .map(|candidate| (score_of(candidate), candidate));

            if let Some((score, candidate)) = best {
                let sequence = &mut self.sequences[m];
                let improves = match sequence.last() {
                    None => true,
                    Some(incumbent) => score <= incumbent.score,
                };
                if improves {
                    sequence.push(MopoEntry {
                        score,
                        candidate: candidate.clone(),
                    });
                    if m < self.objective_count {
                        debug!("MOPO updated for objective {}: {}", m, score);
                    } else {
                        debug!("MOPO updated for aggregate: {}", score);
                    }
                }
            }
        }
    }
}
