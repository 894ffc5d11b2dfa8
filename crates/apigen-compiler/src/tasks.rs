//! Bounded fan-out of blocking work onto the tokio runtime.
//!
//! Every input becomes one task. A semaphore bounds how many run at once,
//! the work itself runs on the blocking pool, and results flow over a
//! channel to a single aggregator. The first error received is the phase's
//! error; tasks already started run to completion and their results are
//! dropped.

use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

use crate::diagnostic::GeneratorError;

/// Runs `work` over `inputs` with at most `limit` calls in flight.
///
/// Outputs are returned in input order, whatever order the tasks finish in.
pub async fn fan_out<I, T, F>(inputs: Vec<I>, limit: usize, work: F) -> Result<Vec<T>, GeneratorError>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(I) -> Result<T, GeneratorError> + Send + Sync + 'static,
{
    let work = Arc::new(work);
    let permits = Arc::new(Semaphore::new(limit.max(1)));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut tasks = JoinSet::new();

    for (index, input) in inputs.into_iter().enumerate() {
        let work = Arc::clone(&work);
        let permits = Arc::clone(&permits);
        let tx = tx.clone();

        tasks.spawn(async move {
            let result = match permits.acquire_owned().await {
                Ok(permit) => {
                    let result = tokio::task::spawn_blocking(move || work(input))
                        .await
                        .unwrap_or_else(|e| Err(GeneratorError::TaskFailed { message: e.to_string() }));
                    drop(permit);
                    result
                }
                Err(e) => Err(GeneratorError::TaskFailed { message: e.to_string() }),
            };
            // The receiver outlives every sender.
            let _ = tx.send((index, result));
        });
    }
    drop(tx);

    let mut outputs = Vec::new();
    let mut first_error = None;

    while let Some((index, result)) = rx.recv().await {
        match result {
            Ok(value) if first_error.is_none() => outputs.push((index, value)),
            Ok(_) => {}
            Err(err) => {
                if first_error.is_none() {
                    tracing::debug!(task = index, error = %err, "task failed");
                    first_error = Some(err);
                } else {
                    tracing::debug!(task = index, error = %err, "discarding later task error");
                }
            }
        }
    }

    // Phase barrier.
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            first_error.get_or_insert(GeneratorError::TaskFailed { message: e.to_string() });
        }
    }

    if let Some(err) = first_error {
        return Err(err);
    }

    outputs.sort_by_key(|(index, _)| *index);
    Ok(outputs.into_iter().map(|(_, value)| value).collect())
}
