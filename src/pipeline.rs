use serde::Serialize;

use crate::error::{RecordError, Rejection};
use crate::ingest::IngestedRow;
use crate::scoring::metrics::finite;
use crate::scoring::{calculate_score, derive_metrics, rank_by_score, Rubric, ScoreResult, Valuation};
use crate::startup::{DerivedMetrics, Recommendation, ScoredRecord, StartupRecord, StartupRow};

/// Output of one pipeline run.
///
/// `scored` is sorted by ascending rank; records sharing a rank keep their
/// input order. `rejected` is in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    pub scored: Vec<ScoredRecord>,
    pub rejected: Vec<Rejection>,
}

/// Aggregate view over a batch, for headers and dashboards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_rows: usize,
    pub scored: usize,
    pub rejected: usize,
    pub invest: usize,
    pub monitor: usize,
    pub reject: usize,
    pub mean_score: Option<f64>,
    pub total_valuation: f64,
    pub mean_valuation: Option<f64>,
    pub top_performer: Option<TopPerformer>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPerformer {
    pub name: String,
    pub investment_score: u8,
    pub valuation: f64,
}

impl BatchResult {
    pub fn is_empty(&self) -> bool {
        self.scored.is_empty() && self.rejected.is_empty()
    }

    pub fn summary(&self) -> BatchSummary {
        let count = |wanted: Recommendation| {
            self.scored
                .iter()
                .filter(|s| s.recommendation == wanted)
                .count()
        };

        let scored = self.scored.len();
        let total_score: u64 = self
            .scored
            .iter()
            .map(|s| u64::from(s.investment_score()))
            .sum();
        let total_valuation: f64 = self.scored.iter().map(|s| s.valuation.amount).sum();
        let mean = |total: f64| (scored > 0).then(|| total / scored as f64);

        // scored is rank-ordered with input order inside a rank, so the first
        // entry is the earliest of the top scorers
        let top_performer = self.scored.first().map(|s| TopPerformer {
            name: s.name().to_string(),
            investment_score: s.investment_score(),
            valuation: s.valuation.amount,
        });

        BatchSummary {
            total_rows: scored + self.rejected.len(),
            scored,
            rejected: self.rejected.len(),
            invest: count(Recommendation::Invest),
            monitor: count(Recommendation::Monitor),
            reject: count(Recommendation::Reject),
            mean_score: mean(total_score as f64),
            total_valuation,
            mean_valuation: mean(total_valuation),
            top_performer,
        }
    }
}

/// Per-record result before batch-level ranking.
struct Evaluated {
    record: StartupRecord,
    metrics: DerivedMetrics,
    valuation: Valuation,
    score: ScoreResult,
}

fn evaluate(record: StartupRecord, rubric: &Rubric) -> Result<Evaluated, RecordError> {
    let metrics = derive_metrics(&record)?;
    let valuation = rubric.valuation.appraise(metrics.arr, record.growth);
    finite(valuation.amount, "valuation")?;
    let score = calculate_score(&record, &metrics, rubric);

    tracing::debug!(
        name = %record.name,
        score = score.score,
        valuation = valuation.amount,
        "scored startup"
    );

    Ok(Evaluated {
        record,
        metrics,
        valuation,
        score,
    })
}

/// One input on its way through the pipeline, with where it came from.
struct Candidate {
    line: Option<u64>,
    name: Option<String>,
    record: Result<StartupRecord, RecordError>,
}

/// Validate, score, rank and classify a batch of ingested rows.
///
/// Rows that fail at any stage are collected in `rejected` and never ranked;
/// the rest of the batch is unaffected. An empty batch gives an empty result.
pub fn process_ingested(rows: Vec<IngestedRow>, rubric: &Rubric) -> BatchResult {
    let candidates = rows.into_iter().map(|ingested| Candidate {
        line: ingested.line,
        name: ingested
            .row
            .as_ref()
            .ok()
            .and_then(StartupRow::display_name),
        record: ingested.row.and_then(StartupRecord::try_from),
    });
    score_batch(candidates, rubric)
}

/// Run the pipeline over raw rows, e.g. built by a caller other than the CSV reader.
pub fn process(rows: Vec<StartupRow>, rubric: &Rubric) -> BatchResult {
    process_ingested(rows.into_iter().map(IngestedRow::from).collect(), rubric)
}

/// Run the pipeline over records that are already validated.
pub fn process_records(records: Vec<StartupRecord>, rubric: &Rubric) -> BatchResult {
    let candidates = records.into_iter().map(|record| Candidate {
        line: None,
        name: Some(record.name.clone()),
        record: Ok(record),
    });
    score_batch(candidates, rubric)
}

fn score_batch(candidates: impl Iterator<Item = Candidate>, rubric: &Rubric) -> BatchResult {
    let mut total: usize = 0;
    let mut evaluated = Vec::new();
    let mut rejected = Vec::new();

    for (index, candidate) in candidates.enumerate() {
        total += 1;
        match candidate.record.and_then(|record| evaluate(record, rubric)) {
            Ok(e) => evaluated.push(e),
            Err(error) => {
                let rejection = Rejection {
                    index,
                    line: candidate.line,
                    name: candidate.name,
                    error,
                };
                tracing::warn!(
                    "skipping {}: {}",
                    rejection.location(),
                    rejection.error
                );
                rejected.push(rejection);
            }
        }
    }

    let scored: Vec<ScoredRecord> = rank_by_score(evaluated, |e| e.score.score)
        .into_iter()
        .map(|(e, rank)| ScoredRecord {
            recommendation: rubric.bands.classify(e.score.score),
            record: e.record,
            metrics: e.metrics,
            valuation: e.valuation,
            score: e.score,
            rank,
        })
        .collect();

    tracing::info!(
        rows = total,
        scored = scored.len(),
        rejected = rejected.len(),
        "batch processed"
    );

    BatchResult { scored, rejected }
}
