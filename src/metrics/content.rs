use crate::domain::RequestOutcome;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Article content statistics over the successful submissions of one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSummary {
    /// Successful submissions that reported content.
    pub articles: usize,
    pub average_words: u64,
    /// Mean of each article's words divided by its submission time.
    pub words_per_second: u64,
}

/// Returns `None` when no successful outcome carries content metrics.
#[must_use]
pub fn summarize_content(outcomes: &[RequestOutcome]) -> Option<ContentSummary> {
    let measured: Vec<(u128, u128)> = outcomes
        .iter()
        .filter_map(|outcome| {
            let metrics = outcome.content()?;
            Some((u128::from(metrics.word_count), outcome.elapsed.as_nanos()))
        })
        .collect();
    let articles = measured.len();
    let count = u128::try_from(articles).ok().filter(|count| *count > 0)?;

    let words = measured
        .iter()
        .try_fold(0u128, |acc, (words, _)| acc.checked_add(*words))?;
    let rates: Vec<u128> = measured
        .iter()
        .filter_map(|(words, nanos)| rounded_div(words.checked_mul(NANOS_PER_SEC)?, *nanos))
        .collect();
    let rate_sum = rates
        .iter()
        .try_fold(0u128, |acc, rate| acc.checked_add(*rate))?;
    let rate_count = u128::try_from(rates.len()).ok()?;

    Some(ContentSummary {
        articles,
        average_words: saturate(rounded_div(words, count)?),
        words_per_second: saturate(rounded_div(rate_sum, rate_count).unwrap_or(0)),
    })
}

/// Division rounded half up; `None` for a zero divisor.
fn rounded_div(numerator: u128, denominator: u128) -> Option<u128> {
    let half = denominator.checked_div(2)?;
    numerator.checked_add(half)?.checked_div(denominator)
}

fn saturate(value: u128) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}
