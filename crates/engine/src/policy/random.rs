use rand::prelude::*;

use blockfall_core::GameSession;

use super::base::Policy;
use crate::place::valid_action_ids;

pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose_action(&mut self, session: &GameSession) -> Option<usize> {
        let ids = valid_action_ids(session);
        let &aid = ids.choose(&mut self.rng)?;
        Some(aid)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
