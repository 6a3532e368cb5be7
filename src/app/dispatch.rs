use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::mpsc;

use crate::domain::{EndpointDefinition, LoadConfiguration, RequestOutcome};
use crate::error::AppResult;
use crate::http::{RequestContext, RequestExecutor};

/// Hands out exactly `limit` request slots across workers.
#[derive(Debug)]
pub(super) struct RepeatBudget {
    limit: usize,
    reserved: AtomicUsize,
}

impl RepeatBudget {
    pub(super) const fn new(limit: usize) -> Self {
        Self {
            limit,
            reserved: AtomicUsize::new(0),
        }
    }

    /// Reserves the next slot, returning its index while any remain.
    pub(super) fn try_reserve(&self) -> Option<usize> {
        loop {
            let current = self.reserved.load(Ordering::Relaxed);
            if current >= self.limit {
                return None;
            }
            let next = current.checked_add(1)?;
            if self
                .reserved
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                return Some(current);
            }
        }
    }
}

/// Sends `load.repeats` requests for one endpoint with at most
/// `load.concurrency` in flight, returning outcomes in completion order.
/// Each slot sends the endpoint's request for that slot, so a batch of
/// variants shares the worker pool.
///
/// # Errors
///
/// Returns an error only when a worker task panics or is cancelled.
pub async fn dispatch(
    executor: &Arc<dyn RequestExecutor>,
    context: &Arc<RequestContext>,
    endpoint: &Arc<EndpointDefinition>,
    load: &LoadConfiguration,
) -> AppResult<Vec<RequestOutcome>> {
    let repeats = load.repeats.get();
    let budget = Arc::new(RepeatBudget::new(repeats));
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<RequestOutcome>(repeats);

    let worker_count = load.worker_count();
    let mut workers = Vec::with_capacity(worker_count);
    for _ in 0..worker_count {
        let executor = Arc::clone(executor);
        let context = Arc::clone(context);
        let endpoint = Arc::clone(endpoint);
        let budget = Arc::clone(&budget);
        let outcome_tx = outcome_tx.clone();
        workers.push(tokio::spawn(async move {
            while let Some(slot) = budget.try_reserve() {
                let request = endpoint.for_slot(slot);
                let outcome = executor.execute(&request, &context).await;
                if outcome_tx.send(outcome).await.is_err() {
                    break;
                }
            }
        }));
    }
    drop(outcome_tx);

    let mut outcomes = Vec::with_capacity(repeats);
    while let Some(outcome) = outcome_rx.recv().await {
        outcomes.push(outcome);
    }
    for worker in workers {
        worker.await?;
    }
    Ok(outcomes)
}
