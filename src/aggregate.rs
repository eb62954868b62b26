use std::marker::PhantomData;

use crate::decider::StateComputation;

/// State Repository trait
///
/// Generic parameters:
///
/// - `C` - Command
/// - `S` - State
/// - `Version` - Version
/// - `Error` - Error
pub trait StateRepository<C, S, Version, Error> {
    /// Fetches current state, based on the command.
    fn fetch_state(&self, command: &C) -> Result<Option<(S, Version)>, Error>;
    /// Saves state. `version` is the version the state was computed from, `None` for new state.
    fn save(&self, state: &S, version: &Option<Version>) -> Result<(S, Version), Error>;
}

/// State Stored Aggregate.
///
/// It is using a `Decider` / [StateComputation] to compute new state based on the current state and the command.
/// It is using a [StateRepository] to fetch the current state and to save the new state.
///
/// Generic parameters:
///
/// - `C` - Command
/// - `S` - State
/// - `E` - Event
/// - `Repository` - State repository
/// - `Decider` - State computation
/// - `Version` - Version
/// - `Error` - Error
pub struct StateStoredAggregate<C, S, E, Repository, Decider, Version, Error>
where
    Repository: StateRepository<C, S, Version, Error>,
    Decider: StateComputation<C, S, E, Error>,
{
    repository: Repository,
    decider: Decider,
    _marker: PhantomData<(C, S, E, Version, Error)>,
}

impl<C, S, E, Repository, Decider, Version, Error>
    StateStoredAggregate<C, S, E, Repository, Decider, Version, Error>
where
    Repository: StateRepository<C, S, Version, Error>,
    Decider: StateComputation<C, S, E, Error>,
{
    /// Creates a new instance of [StateStoredAggregate].
    pub fn new(repository: Repository, decider: Decider) -> Self {
        StateStoredAggregate {
            repository,
            decider,
            _marker: PhantomData,
        }
    }

    /// Handles the command by fetching the state from the repository, computing new state based on the current state and the command, and saving the new state to the repository.
    pub fn handle(&self, command: &C) -> Result<(S, Version), Error> {
        match self.repository.fetch_state(command)? {
            None => {
                let new_state = self.decider.compute_new_state(None, command)?;
                self.repository.save(&new_state, &None)
            }
            Some((state, version)) => {
                let new_state = self.decider.compute_new_state(Some(state), command)?;
                self.repository.save(&new_state, &Some(version))
            }
        }
    }
}

impl<C, S, Version, Error, R> StateRepository<C, S, Version, Error> for &R
where
    R: StateRepository<C, S, Version, Error>,
{
    fn fetch_state(&self, command: &C) -> Result<Option<(S, Version)>, Error> {
        (**self).fetch_state(command)
    }

    fn save(&self, state: &S, version: &Option<Version>) -> Result<(S, Version), Error> {
        (**self).save(state, version)
    }
}
