use crate::domain::agent::learning_parameters::LearningParameters;
use crate::domain::utils::id::NodeId;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashMap;

/// Tabular Q-learning agent over node identifiers.
///
/// The state is the node a migration originates from and the action is the
/// candidate destination. Absent `(state, action)` pairs are worth `0.0`.
/// Every `update` is an independent one-step temporal-difference update on
/// the live table; there are no episodes.
#[derive(Debug, Clone)]
pub struct ValueTable {
    parameters: LearningParameters,
    values: HashMap<(NodeId, NodeId), f64>,
    known_actions: Vec<NodeId>,
}

impl ValueTable {
    pub fn new(parameters: LearningParameters) -> Self {
        Self { parameters, values: HashMap::new(), known_actions: Vec::new() }
    }

    pub fn get(&self, state: &NodeId, action: &NodeId) -> f64 {
        self.values.get(&(state.clone(), action.clone())).copied().unwrap_or(0.0)
    }

    /// Epsilon-greedy selection among `available_actions`.
    ///
    /// With probability epsilon a uniformly random action is returned.
    /// Otherwise one of the actions with the highest value is returned, ties
    /// broken uniformly at random. `None` only if `available_actions` is empty.
    pub fn choose_action<R: Rng>(&self, state: &NodeId, available_actions: &[NodeId], rng: &mut R) -> Option<NodeId> {
        if available_actions.is_empty() {
            return None;
        }

        if rng.random::<f64>() < self.parameters.epsilon() {
            log::trace!("Exploring from {} among {} actions", state, available_actions.len());
            return available_actions.choose(rng).cloned();
        }

        let scored: Vec<(&NodeId, f64)> = available_actions.iter().map(|action| (action, self.get(state, action))).collect();
        let max_q = scored.iter().map(|(_, q)| *q).fold(f64::NEG_INFINITY, f64::max);
        let best_actions: Vec<&NodeId> = scored.iter().filter(|(_, q)| *q == max_q).map(|(action, _)| *action).collect();

        best_actions.choose(rng).map(|action| (*action).clone())
    }

    /// `Q(s,a) += alpha * (reward + gamma * max_k Q(s',k) - Q(s,a))`, where `k`
    /// ranges over every known node, not only the neighbors of `next_state`.
    pub fn update(&mut self, state: &NodeId, action: &NodeId, reward: f64, next_state: &NodeId) {
        let current_q = self.get(state, action);
        let max_next_q = self.max_value(next_state);
        let new_q = current_q + self.parameters.alpha() * (reward + self.parameters.gamma() * max_next_q - current_q);

        log::trace!("Q({}, {}) {:.4} -> {:.4} (reward {:.4}, max next {:.4})", state, action, current_q, new_q, reward, max_next_q);

        self.values.insert((state.clone(), action.clone()), new_q);
    }

    /// Replaces the set of known actions. Must follow every change to the node set.
    pub fn sync_actions<I>(&mut self, node_ids: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        self.known_actions = node_ids.into_iter().collect();
    }

    pub fn known_actions(&self) -> &[NodeId] {
        &self.known_actions
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn max_value(&self, state: &NodeId) -> f64 {
        if self.known_actions.is_empty() {
            return 0.0;
        }

        self.known_actions.iter().map(|action| self.get(state, action)).fold(f64::NEG_INFINITY, f64::max)
    }
}
