use crate::{DecideFunction, EvolveFunction, InitialStateFunction};

/// [Decider] represents the main decision-making algorithm.
/// It has three generic parameters `C`/`Command`, `S`/`State`, `E`/`Event` , representing the type of the values that Decider may contain or use.
/// `'a` is used as a lifetime parameter, indicating that all references contained within the struct (e.g., references within the function closures) must have a lifetime that is at least as long as 'a.
///
/// The closures are not required to be `Send`/`Sync`: every decider in this crate is driven from a
/// single UI event loop, one command at a time.
///
/// ## Example
/// ```
/// use ticket_desk::decider::{EventComputation, StateComputation};
/// use ticket_desk::model::OrderId;
/// use ticket_desk::ticket_draft::{self, TicketDraftCommand, TicketDraftEvent};
///
/// let decider = ticket_draft::decider();
/// let open = TicketDraftCommand::Open(OrderId::from("o-1"));
///
/// let new_events = decider.compute_new_events(&[], &open);
/// assert_eq!(new_events, Ok(vec![TicketDraftEvent::Opened(OrderId::from("o-1"))]));
///
/// let new_state = decider.compute_new_state(None, &open).unwrap();
/// assert_eq!(new_state.order_id, Some(OrderId::from("o-1")));
/// assert!(new_state.pending.is_empty());
/// ```
pub struct Decider<'a, C: 'a, S: 'a, E: 'a, Error: 'a = ()> {
    /// The `decide` function is used to decide which events to produce based on the command and the current state.
    pub decide: DecideFunction<'a, C, S, E, Error>,
    /// The `evolve` function is used to evolve the state based on the current state and the event.
    pub evolve: EvolveFunction<'a, S, E>,
    /// The `initial_state` function is used to produce the initial state of the decider.
    pub initial_state: InitialStateFunction<'a, S>,
}

impl<'a, C, S, E, Error> Decider<'a, C, S, E, Error> {
    /// Maps the Decider over the Error type parameter.
    /// Creates a new instance of [Decider]`<C, S, E, Error2>`.
    pub fn map_error<Error2, F>(self, f: F) -> Decider<'a, C, S, E, Error2>
    where
        F: Fn(&Error) -> Error2 + 'a,
    {
        let new_decide = Box::new(move |c: &C, s: &S| (self.decide)(c, s).map_err(|e| f(&e)));

        let new_evolve = Box::new(move |s: &S, e: &E| (self.evolve)(s, e));

        let new_initial_state = Box::new(move || (self.initial_state)());

        Decider {
            decide: new_decide,
            evolve: new_evolve,
            initial_state: new_initial_state,
        }
    }

    /// Folds the events into the given state.
    pub fn evolve_all<'e>(&self, state: S, events: impl IntoIterator<Item = &'e E>) -> S
    where
        E: 'e,
    {
        events
            .into_iter()
            .fold(state, |state, event| (self.evolve)(&state, event))
    }
}

/// Formalizes the `Event Computation` algorithm / event sourced system for the `decider` to handle commands based on the current events, and produce new events.
pub trait EventComputation<C, S, E, Error = ()> {
    /// Computes new events based on the current events and the command.
    fn compute_new_events(&self, current_events: &[E], command: &C) -> Result<Vec<E>, Error>;
}

/// Formalizes the `State Computation` algorithm / state-stored system for the `decider` to handle commands based on the current state, and produce new state.
pub trait StateComputation<C, S, E, Error = ()> {
    /// Computes new state based on the current state and the command.
    fn compute_new_state(&self, current_state: Option<S>, command: &C) -> Result<S, Error>;
}

impl<C, S, E, Error> EventComputation<C, S, E, Error> for Decider<'_, C, S, E, Error> {
    fn compute_new_events(&self, current_events: &[E], command: &C) -> Result<Vec<E>, Error> {
        let current_state = self.evolve_all((self.initial_state)(), current_events);
        (self.decide)(command, &current_state)
    }
}

impl<C, S, E, Error> StateComputation<C, S, E, Error> for Decider<'_, C, S, E, Error> {
    fn compute_new_state(&self, current_state: Option<S>, command: &C) -> Result<S, Error> {
        let effective_current_state = current_state.unwrap_or_else(|| (self.initial_state)());
        let events = (self.decide)(command, &effective_current_state)?;
        Ok(self.evolve_all(effective_current_state, &events))
    }
}
