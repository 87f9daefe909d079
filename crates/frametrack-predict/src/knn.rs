use std::collections::VecDeque;

use tracing::trace;

use crate::{Location, MovementPredictor};

/// A training row: `[x, y, vx_in, vy_in, ax_in, ay_in, vx_out, vy_out]`. The
/// first six columns are the query feature space; the last two are the
/// velocity the row was observed to produce next.
type TrainingRow = [f64; 8];

/// Predicts the next location by averaging the outgoing velocity of the `k`
/// nearest neighbours (by Euclidean distance over position/velocity/
/// acceleration features) in a rolling training buffer.
///
/// Intended to be shared across every track of a class: construct one
/// instance via a [`crate::MovementPredictorFactory`] and hand the same
/// handle to each track rather than reaching for process-wide state.
#[derive(Debug, Clone)]
pub struct KnnPredictor {
    k: usize,
    max_history: usize,
    dataset: VecDeque<TrainingRow>,
}

impl KnnPredictor {
    #[must_use]
    pub fn new(k: usize, max_history: usize) -> Self {
        Self {
            k,
            max_history,
            dataset: VecDeque::with_capacity(max_history.min(1024)),
        }
    }

    fn training_row(history: &[Location]) -> Option<TrainingRow> {
        if history.len() < 4 {
            return None;
        }
        let n = history.len();
        let (x, y) = history[n - 1];
        let (px, py) = history[n - 2];
        let (ppx, ppy) = history[n - 3];
        let (pppx, pppy) = history[n - 4];

        let out_vx = x - px;
        let out_vy = y - py;
        let in_vx = px - ppx;
        let in_vy = py - ppy;
        let in_ax = in_vx - (ppx - pppx);
        let in_ay = in_vy - (ppy - pppy);

        Some([px, py, in_vx, in_vy, in_ax, in_ay, out_vx, out_vy])
    }

    fn query_feature(x: f64, y: f64, history: &[Location]) -> [f64; 6] {
        let n = history.len();
        let (in_vx, in_vy) = if n >= 1 {
            let (lx, ly) = history[n - 1];
            (x - lx, y - ly)
        } else {
            (0.0, 0.0)
        };
        let (in_ax, in_ay) = if n >= 2 {
            let (lx, ly) = history[n - 1];
            let (llx, lly) = history[n - 2];
            (in_vx - (lx - llx), in_vy - (ly - lly))
        } else {
            (0.0, 0.0)
        };
        [x, y, in_vx, in_vy, in_ax, in_ay]
    }

    fn train(&mut self, history: &[Location]) {
        if let Some(row) = Self::training_row(history) {
            self.dataset.push_back(row);
            while self.dataset.len() > self.max_history {
                self.dataset.pop_front();
            }
        }
    }
}

impl MovementPredictor for KnnPredictor {
    fn predict(&mut self, x: f64, y: f64, history: &[Location]) -> Location {
        if history.is_empty() {
            return (x, y);
        }
        self.train(history);

        if self.dataset.len() < self.k {
            trace!(dataset_len = self.dataset.len(), k = self.k, "knn predictor below bootstrap threshold");
            return (x, y);
        }

        let feature = Self::query_feature(x, y, history);
        let mut neighbours: Vec<(f64, f64, f64)> = self
            .dataset
            .iter()
            .map(|row| {
                let distance = row[..6]
                    .iter()
                    .zip(feature.iter())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum::<f64>()
                    .sqrt();
                (distance, row[6], row[7])
            })
            .collect();
        neighbours.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("distances are never NaN"));
        neighbours.truncate(self.k);

        let k = self.k as f64;
        let vx = neighbours.iter().map(|n| n.1).sum::<f64>() / k;
        let vy = neighbours.iter().map(|n| n.2).sum::<f64>() / k;
        (x + vx, y + vy)
    }

    fn predict_n(&mut self, x: f64, y: f64, history: &[Location], n: usize) -> Vec<Location> {
        let dataset_backup = self.dataset.clone();
        let mut extended_history = history.to_vec();
        let mut locations = Vec::with_capacity(n);
        let (mut cx, mut cy) = (x, y);
        for _ in 0..n {
            let (nx, ny) = self.predict(cx, cy, &extended_history);
            locations.push((nx, ny));
            extended_history.push((nx, ny));
            cx = nx;
            cy = ny;
        }
        self.dataset = dataset_backup;
        locations
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "kind": "knn",
            "k": self.k,
            "max_history": self.max_history,
            "dataset_len": self.dataset.len(),
        })
    }
}
