use serde::{Deserialize, Serialize};

/// The four scalar weights `λ1..λ4` of the learning-path objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    /// `λ1`: flat per-selection baseline of the goal-reward term.
    pub goal_reward: f64,
    /// `λ2`: scale of the synergy reward between course pairs.
    pub synergy: f64,
    /// `λ3`: scale of goal-skill coverage (reward) and goal-overlap (penalty).
    pub goal_overlap: f64,
    /// `λ4`: scale of the prerequisite-ordering penalty.
    pub prerequisite: f64,
}

impl ObjectiveWeights {
    pub const fn new(goal_reward: f64, synergy: f64, goal_overlap: f64, prerequisite: f64) -> Self {
        Self {
            goal_reward,
            synergy,
            goal_overlap,
            prerequisite,
        }
    }

    pub const fn from_array(lambdas: [f64; 4]) -> Self {
        Self::new(lambdas[0], lambdas[1], lambdas[2], lambdas[3])
    }

    pub const fn to_array(self) -> [f64; 4] {
        [
            self.goal_reward,
            self.synergy,
            self.goal_overlap,
            self.prerequisite,
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|w| w.is_finite())
    }
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self::from_array([1.2, 0.1, 1.9, 0.7])
    }
}
