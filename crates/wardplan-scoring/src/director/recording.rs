// Recording trial scope with automatic rollback.
//
// ```text
// let mut trial = director.trial();
// trial.assign(p, a);          // old assignment recorded
// let score = trial.score();   // reads through to the director
// // dropped: moves undone in reverse order
// // trial.commit(): moves kept
// ```

use std::ops::Deref;

use smallvec::SmallVec;
use wardplan_core::Assignment;

use super::ScoreDirector;

/// A scope of tentative moves on a [`ScoreDirector`].
///
/// Each [`assign`](Trial::assign) records the patient's previous assignment.
/// Dropping the trial restores every recorded assignment in reverse order;
/// [`commit`](Trial::commit) keeps them instead. Read access to the director
/// is available through `Deref`.
///
/// # Example
///
/// ```
/// use wardplan_core::{Allocation, Assignment};
/// use wardplan_scoring::{ObjectiveWeights, ScoreDirector};
///
/// let instance = wardplan_test::scenarios::tiny();
/// let start = Allocation::new(vec![Assignment::new(0, 0); 3]);
/// let mut director = ScoreDirector::new(&instance, ObjectiveWeights::default(), start.clone()).unwrap();
///
/// {
///     let mut trial = director.trial();
///     trial.assign(1, Assignment::new(0, 1));
///     assert_eq!(trial.assignment(1), Assignment::new(0, 1));
/// }
/// assert_eq!(director.allocation(), &start);
/// ```
pub struct Trial<'d, 'a> {
    director: &'d mut ScoreDirector<'a>,
    undo: SmallVec<[(usize, Assignment); 4]>,
}

impl<'d, 'a> Trial<'d, 'a> {
    pub(super) fn new(director: &'d mut ScoreDirector<'a>) -> Self {
        Self {
            director,
            undo: SmallVec::new(),
        }
    }

    /// Moves the patient and records the previous assignment.
    pub fn assign(&mut self, patient: usize, assignment: Assignment) -> Assignment {
        let old = self.director.assign(patient, assignment);
        self.undo.push((patient, old));
        old
    }

    /// Number of recorded moves.
    pub fn change_count(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    /// Undoes all recorded moves in reverse order.
    ///
    /// The trial stays open and can record further moves.
    pub fn rollback(&mut self) {
        while let Some((patient, old)) = self.undo.pop() {
            self.director.assign(patient, old);
        }
    }

    /// Keeps every recorded move.
    pub fn commit(mut self) {
        self.undo.clear();
    }
}

impl<'a> Deref for Trial<'_, 'a> {
    type Target = ScoreDirector<'a>;

    fn deref(&self) -> &Self::Target {
        self.director
    }
}

impl Drop for Trial<'_, '_> {
    fn drop(&mut self) {
        self.rollback();
    }
}
