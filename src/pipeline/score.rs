/// Combines the partial scores into the final ticket SCORE.
///
/// The bonus weights (take-over, visit, RCA, closure; at most 1.0 together)
/// are scaled by the SLA ratio, which is itself capped at 1.5. A ticket
/// resolved almost instantly has a ratio near zero and therefore scores near
/// zero, so a faster fix can score lower than a slower one. That shape is
/// part of the business rule and is kept as-is.
pub fn composite(
    score_to: f64,
    score_visit: f64,
    score_rca: f64,
    score_closed: f64,
    score_mttr: f64,
) -> f64 {
    (score_to + score_visit + score_rca + score_closed) * score_mttr
}
