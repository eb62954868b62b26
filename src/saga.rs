use crate::ReactFunction;

/// [Saga] is a datatype that represents the central point of control, deciding what to execute next (`A`), based on the action result (`AR`).
/// It has two generic parameters `AR`/Action Result, `A`/Action , representing the type of the values that Saga may contain or use.
/// `'a` is used as a lifetime parameter, indicating that all references contained within the struct (e.g., references within the function closures) must have a lifetime that is at least as long as 'a.
///
/// Here the action result is an event of one decider and the action is a command for another, e.g.
/// an issue submitted in the draft builder becomes an `AddIssue` command for the ticket draft.
pub struct Saga<'a, AR: 'a, A: 'a> {
    /// The `react` function is driving the next action based on the action result.
    pub react: ReactFunction<'a, AR, A>,
}

/// Formalizes the `Action Computation` algorithm for the `saga` to handle events/action_results, and produce new commands/actions.
pub trait ActionComputation<AR, A> {
    /// Computes new commands/actions based on the event/action_result.
    fn compute_new_actions(&self, event: &AR) -> Vec<A>;
}

impl<AR, A> ActionComputation<AR, A> for Saga<'_, AR, A> {
    fn compute_new_actions(&self, event: &AR) -> Vec<A> {
        (self.react)(event)
    }
}
