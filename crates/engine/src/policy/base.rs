use blockfall_core::GameSession;

/// Policy chooses a placement for the current state.
///
/// Returns an action id in `[0, ACTION_DIM)`, or `None` if the session has
/// nothing to place.
///
/// Object-safe so it can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn choose_action(&mut self, session: &GameSession) -> Option<usize>;

    /// Short name for logs and stats.
    fn name(&self) -> &'static str;
}
