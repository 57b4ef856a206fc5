//! Fixed-size worker pool over blocking tasks
//!
//! The input is split into at most `workers` contiguous chunks, each chunk runs
//! on its own blocking task, and the chunks are joined back in order. The
//! output therefore lines up with the input regardless of which worker
//! finishes first.

use crate::error::Result;
use std::sync::Arc;

/// Apply `f` to every item across `workers` blocking tasks, preserving order
pub async fn map_ordered<T, R, F>(items: Vec<T>, workers: usize, f: F) -> Result<Vec<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> R + Send + Sync + 'static,
{
    let total = items.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let chunk_size = total.div_ceil(workers.max(1));
    let f = Arc::new(f);

    let mut handles = Vec::new();
    let mut items = items.into_iter();
    loop {
        let chunk: Vec<T> = items.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        let f = f.clone();
        handles.push(tokio::task::spawn_blocking(move || {
            chunk.into_iter().map(|item| f(item)).collect::<Vec<R>>()
        }));
    }

    let mut results = Vec::with_capacity(total);
    for handle in handles {
        results.extend(handle.await?);
    }
    Ok(results)
}
