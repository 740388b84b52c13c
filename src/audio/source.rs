//! Pull-style sample sources feeding the plot.

use std::sync::{Arc, Mutex};

/// Supplies the current signal snapshot, once per rendered frame.
///
/// Implementations are called synchronously on the render path and should
/// return promptly. There is no queueing: each pull yields whatever the
/// producer considers "now".
pub trait SampleSource {
    fn pull(&mut self) -> Vec<f32>;
}

impl<F> SampleSource for F
where
    F: FnMut() -> Vec<f32>,
{
    fn pull(&mut self) -> Vec<f32> {
        self()
    }
}

/// Latest-snapshot cell shared between an audio producer and the renderer.
///
/// Producers overwrite the snapshot with [`SharedSamples::publish`]; the
/// renderer clones it on every pull. Older snapshots are simply replaced.
#[derive(Debug, Clone, Default)]
pub struct SharedSamples {
    inner: Arc<Mutex<Vec<f32>>>,
}

impl SharedSamples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot.
    pub fn publish(&self, samples: &[f32]) {
        let mut guard = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.clear();
        guard.extend_from_slice(samples);
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> Vec<f32> {
        match self.inner.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl SampleSource for SharedSamples {
    fn pull(&mut self) -> Vec<f32> {
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_a_source() {
        let mut calls = 0;
        let mut source = || {
            calls += 1;
            vec![calls as f32]
        };
        assert_eq!(SampleSource::pull(&mut source), vec![1.0]);
        assert_eq!(SampleSource::pull(&mut source), vec![2.0]);
    }

    #[test]
    fn test_shared_samples_latest_wins() {
        let producer = SharedSamples::new();
        let mut consumer = producer.clone();
        assert!(consumer.pull().is_empty());

        producer.publish(&[0.1, 0.2]);
        producer.publish(&[0.3, 0.4, 0.5]);
        assert_eq!(consumer.pull(), vec![0.3, 0.4, 0.5]);
        // Pulling does not drain.
        assert_eq!(consumer.pull(), vec![0.3, 0.4, 0.5]);
    }

    #[test]
    fn test_shared_samples_across_threads() {
        let producer = SharedSamples::new();
        let mut consumer = producer.clone();
        std::thread::spawn(move || producer.publish(&[1.0, -1.0]))
            .join()
            .unwrap();
        assert_eq!(consumer.pull(), vec![1.0, -1.0]);
    }
}
