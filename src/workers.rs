use std::sync::mpsc;

use crate::error::Result;

/// Runs `work` on every item in parallel, one task per item, and hands the
/// results back in item order whatever order the tasks finish in.
///
/// Tasks share nothing mutable; each reports `(index, result)` over a channel
/// and the caller waits until every task has reported. If several tasks fail,
/// the error of the lowest index wins.
pub fn fan_out<I, T, F>(items: Vec<I>, work: F) -> Result<Vec<T>>
where
    I: Send,
    T: Send,
    F: Fn(usize, I) -> Result<T> + Sync,
{
    let count = items.len();
    let (tx, rx) = mpsc::channel();

    rayon::scope(|s| {
        for (index, item) in items.into_iter().enumerate() {
            let tx = tx.clone();
            let work = &work;
            s.spawn(move |_| {
                // The receiver outlives the scope, so the send cannot fail.
                let _ = tx.send((index, work(index, item)));
            });
        }
    });
    drop(tx);

    let mut tagged: Vec<(usize, Result<T>)> = rx.iter().take(count).collect();
    tagged.sort_unstable_by_key(|(index, _)| *index);
    tagged.into_iter().map(|(_, result)| result).collect()
}
