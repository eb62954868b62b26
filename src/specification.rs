//! ## A test specification DSL for deciders and views that supports the given-when-then format.
//!
//! ```
//! use ticket_desk::model::OrderId;
//! use ticket_desk::specification::DeciderTestSpecification;
//! use ticket_desk::ticket_draft::{self, TicketDraftCommand, TicketDraftEvent};
//! use ticket_desk::error::ValidationError;
//!
//! DeciderTestSpecification::default()
//!     .for_decider(ticket_draft::decider())
//!     .given(vec![TicketDraftEvent::Opened(OrderId::from("o-1"))])
//!     .when(TicketDraftCommand::Commit)
//!     .then_error(ValidationError::EmptyTicket);
//! ```

use pretty_assertions::assert_eq;

use crate::{
    decider::{Decider, EventComputation, StateComputation},
    view::{View, ViewStateComputation},
};

// ########################################################
// ############# Decider Specification DSL ################
// ########################################################

/// A test specification DSL for deciders that supports the `given-when-then` format.
/// GIVEN the events that already happened (or a state), WHEN a command is handled, THEN these events,
/// this state or this error are expected.
pub struct DeciderTestSpecification<'a, Command, State, Event, Error>
where
    Event: PartialEq + std::fmt::Debug,
    Error: PartialEq + std::fmt::Debug,
{
    events: Vec<Event>,
    state: Option<State>,
    command: Option<Command>,
    decider: Option<Decider<'a, Command, State, Event, Error>>,
}

impl<Command, State, Event, Error> Default
    for DeciderTestSpecification<'_, Command, State, Event, Error>
where
    Event: PartialEq + std::fmt::Debug,
    Error: PartialEq + std::fmt::Debug,
{
    fn default() -> Self {
        Self {
            events: Vec::new(),
            state: None,
            command: None,
            decider: None,
        }
    }
}

impl<'a, Command, State, Event, Error> DeciderTestSpecification<'a, Command, State, Event, Error>
where
    Command: std::fmt::Debug,
    Event: PartialEq + std::fmt::Debug,
    State: PartialEq + std::fmt::Debug,
    Error: PartialEq + std::fmt::Debug,
{
    /// Specify the decider you want to test
    pub fn for_decider(mut self, decider: Decider<'a, Command, State, Event, Error>) -> Self {
        self.decider = Some(decider);
        self
    }

    /// Given preconditions / previous events
    pub fn given(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    /// Given preconditions / previous state
    pub fn given_state(mut self, state: Option<State>) -> Self {
        self.state = state;
        self
    }

    /// When action/command
    pub fn when(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    #[track_caller]
    /// Then expect result / new events
    pub fn then(mut self, expected_events: Vec<Event>) {
        let (decider, command) = self.parts();
        let new_events = match decider.compute_new_events(&self.events, &command) {
            Ok(events) => events,
            Err(error) => {
                panic!("Events were expected but the decider returned an error instead: {error:?}")
            }
        };
        assert_eq!(
            new_events, expected_events,
            "Actual and Expected events do not match!\nCommand: {command:?}\n",
        );
    }

    #[track_caller]
    /// Then expect new state
    pub fn then_state(mut self, expected_state: State) {
        let (decider, command) = self.parts();
        let new_state = match decider.compute_new_state(self.state, &command) {
            Ok(state) => state,
            Err(error) => {
                panic!("State was expected but the decider returned an error instead: {error:?}")
            }
        };
        assert_eq!(
            new_state, expected_state,
            "Actual and Expected states do not match.\nCommand: {command:?}\n"
        );
    }

    #[track_caller]
    /// Then expect error result / these are not events
    pub fn then_error(mut self, expected_error: Error) {
        let (decider, command) = self.parts();
        let error = match decider.compute_new_events(&self.events, &command) {
            Ok(events) => {
                panic!("An error was expected but the decider returned events instead: {events:?}")
            }
            Err(error) => error,
        };
        assert_eq!(
            error, expected_error,
            "Actual and Expected errors do not match.\nCommand: {command:?}\n"
        );
    }

    #[track_caller]
    fn parts(&mut self) -> (Decider<'a, Command, State, Event, Error>, Command) {
        let decider = self
            .decider
            .take()
            .expect("Decider must be initialized. Did you forget to call `for_decider`?");
        let command = self
            .command
            .take()
            .expect("Command must be initialized. Did you forget to call `when`?");
        (decider, command)
    }
}

// ########################################################
// ############### View Specification DSL #################
// ########################################################

/// A test specification DSL for views that supports the `given-then` format.
/// GIVEN the events that already happened, THEN this view state is expected.
pub struct ViewTestSpecification<'a, State, Event>
where
    State: PartialEq + std::fmt::Debug,
{
    events: Vec<Event>,
    view: Option<View<'a, State, Event>>,
}

impl<State, Event> Default for ViewTestSpecification<'_, State, Event>
where
    State: PartialEq + std::fmt::Debug,
{
    fn default() -> Self {
        Self {
            events: Vec::new(),
            view: None,
        }
    }
}

impl<'a, State, Event> ViewTestSpecification<'a, State, Event>
where
    State: PartialEq + std::fmt::Debug,
    Event: std::fmt::Debug,
{
    /// Specify the view you want to test
    pub fn for_view(mut self, view: View<'a, State, Event>) -> Self {
        self.view = Some(view);
        self
    }

    /// Given preconditions / events
    pub fn given(mut self, events: Vec<Event>) -> Self {
        self.events = events;
        self
    }

    #[track_caller]
    /// Then expect evolving new state of the view
    pub fn then(self, expected_state: State) {
        let view = self
            .view
            .expect("View must be initialized. Did you forget to call `for_view`?");

        let event_refs: Vec<&Event> = self.events.iter().collect();
        let new_state = view.compute_new_state(None, &event_refs);

        assert_eq!(
            new_state, expected_state,
            "Actual and Expected states do not match.\nEvents: {:?}\n",
            self.events
        );
    }
}
