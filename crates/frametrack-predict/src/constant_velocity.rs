use crate::{Location, MovementPredictor};

/// Assumes the object continues moving at the velocity observed between the
/// current point and the most recent history point. With no history,
/// predicts no motion (identity).
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantVelocityPredictor;

impl MovementPredictor for ConstantVelocityPredictor {
    fn predict(&mut self, x: f64, y: f64, history: &[Location]) -> Location {
        match history.last() {
            Some(&(last_x, last_y)) => {
                let (vx, vy) = (x - last_x, y - last_y);
                (x + vx, y + vy)
            }
            None => (x, y),
        }
    }

    fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({ "kind": "constant_velocity" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_with_no_history() {
        let mut p = ConstantVelocityPredictor;
        assert_eq!(p.predict(10.0, 10.0, &[]), (10.0, 10.0));
    }

    #[test]
    fn extrapolates_observed_velocity() {
        let mut p = ConstantVelocityPredictor;
        let history = [(8.0, 10.0)];
        assert_eq!(p.predict(10.0, 10.0, &history), (12.0, 10.0));
    }

    #[test]
    fn predict_n_chains_forward() {
        let mut p = ConstantVelocityPredictor;
        let history = [(8.0, 10.0)];
        let out = p.predict_n(10.0, 10.0, &history, 3);
        assert_eq!(out, vec![(12.0, 10.0), (14.0, 10.0), (16.0, 10.0)]);
    }
}
