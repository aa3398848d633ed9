use std::path::PathBuf;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    export::{export_items, ExportError},
    item::{NameError, PracticeItem},
    progress::{summarize, ProgressSnapshot},
    random::{draw_distinct, RangeError},
};

///An item shown in the current draw. Once practiced it cannot be selected
///again until the next draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawnItem {
    pub index: usize,
    pub practiced: bool,
}

///Owns the working model for one run, plus the items currently drawn.
#[derive(Debug, Default)]
pub struct Session {
    items: Vec<PracticeItem>,
    drawn: Vec<DrawnItem>,
}

impl Session {
    pub fn new(items: Vec<PracticeItem>) -> Self {
        Self {
            items,
            drawn: vec![],
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[PracticeItem] {
        &self.items
    }

    pub fn drawn(&self) -> &[DrawnItem] {
        &self.drawn
    }

    pub fn drawn_item(&self, slot: usize) -> Option<(&DrawnItem, &PracticeItem)> {
        self.drawn
            .get(slot)
            .and_then(|drawn| self.items.get(drawn.index).map(|item| (drawn, item)))
    }

    ///Replaces the current draw. On error the previous draw is kept.
    pub fn draw(&mut self, count: usize, rng: &mut impl Rng) -> Result<&[DrawnItem], RangeError> {
        let indices = draw_distinct(count, self.items.len(), rng)?;

        self.drawn.clear();
        indices.into_iter().for_each(|index| {
            self.drawn.push(DrawnItem {
                index,
                practiced: false,
            })
        });

        let drawn_indices = self.drawn.iter().map(|drawn| drawn.index).collect::<Vec<_>>();
        debug!(count, indices = ?drawn_indices, "drew items");

        Ok(&self.drawn)
    }

    ///Returns the new counter, or `None` if there is no item at `index` or its
    ///counter is already at `u64::MAX`.
    pub fn increment(&mut self, index: usize) -> Option<u64> {
        let item = self.items.get_mut(index)?;

        let Some(counter) = item.counter.checked_add(1) else {
            warn!(item = %item.name, "counter is saturated, not incremented");
            return None;
        };

        item.counter = counter;
        info!(item = %item.name, counter, "item practiced");
        Some(counter)
    }

    ///Marks the drawn item in `slot` as practiced. Returns the new counter, or
    ///`None` if the slot is empty, was already practiced in this draw, or the
    ///counter cannot be incremented.
    pub fn mark_practiced(&mut self, slot: usize) -> Option<u64> {
        let index = self
            .drawn
            .get(slot)
            .filter(|drawn| !drawn.practiced)
            .map(|drawn| drawn.index)?;

        let counter = self.increment(index)?;
        if let Some(drawn) = self.drawn.get_mut(slot) {
            drawn.practiced = true;
        }
        Some(counter)
    }

    pub fn summarize(&self) -> Result<ProgressSnapshot, NameError> {
        summarize(&self.items)
    }

    pub fn export(&self, path: impl Into<PathBuf>) -> Result<(), ExportError> {
        export_items(&self.items, path)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use serde_json::json;

    use crate::{
        catalog::{load_items, Catalog}, export::ExportError, item::PracticeItem, random::RangeError,
    };

    use super::Session;

    fn sample_session() -> Session {
        Session::new(load_items("./tests/catalog.json").expect("Unable to load test catalog"))
    }

    #[test]
    fn increment_twice_adds_two() {
        let mut session = sample_session();
        let before = session.items().to_vec();

        assert_eq!(session.increment(1), Some(1));
        assert_eq!(session.increment(1), Some(2));

        for (i, (old, new)) in before.iter().zip(session.items()).enumerate() {
            if i == 1 {
                assert_eq!(new.counter, old.counter + 2);
            } else {
                assert_eq!(new, old);
            }
        }
    }

    #[test]
    fn increment_out_of_range() {
        let mut session = sample_session();
        assert_eq!(session.increment(5), None);
    }

    #[test]
    fn increment_saturated_counter() {
        let rng = &mut StdRng::seed_from_u64(3);
        let catalog = Catalog::from_value(&json!({
            "subjects": [{"name": "Math", "subtopics": [{"name": "Algebra", "counter": u64::MAX}]}]
        }))
        .expect("Maximum counter must load");
        let mut session = Session::new(catalog.flatten());

        assert_eq!(session.increment(0), None);
        assert_eq!(session.items()[0].counter, u64::MAX);
        assert!(session.items()[0].is_completed());

        session.draw(1, rng).expect("Unable to draw");
        assert_eq!(session.mark_practiced(0), None);
        assert!(session.drawn().iter().all(|drawn| !drawn.practiced));
    }

    #[test]
    fn draw_replaces_previous_draw() {
        let rng = &mut StdRng::seed_from_u64(1);
        let mut session = sample_session();

        assert_eq!(session.draw(3, rng).map(|drawn| drawn.len()), Ok(3));
        assert_eq!(session.draw(2, rng).map(|drawn| drawn.len()), Ok(2));
        assert!(session.drawn().iter().all(|drawn| !drawn.practiced));
    }

    #[test]
    fn draw_too_many_keeps_previous_draw() {
        let rng = &mut StdRng::seed_from_u64(1);
        let mut session = sample_session();
        session.draw(2, rng).expect("Unable to draw");
        let previous = session.drawn().to_vec();

        assert_eq!(
            session.draw(6, rng).map(|drawn| drawn.len()),
            Err(RangeError {
                requested: 6,
                available: 5
            })
        );
        assert_eq!(session.drawn(), previous.as_slice());
    }

    #[test]
    fn mark_practiced_once_per_draw() {
        let rng = &mut StdRng::seed_from_u64(2);
        let mut session = sample_session();
        session.draw(1, rng).expect("Unable to draw");

        let index = session.drawn()[0].index;
        let before = session.items()[index].counter;

        assert_eq!(session.mark_practiced(0), Some(before + 1));
        assert_eq!(session.mark_practiced(0), None);
        assert_eq!(session.mark_practiced(1), None);
        assert_eq!(session.items()[index].counter, before + 1);
        assert!(session.drawn_item(0).is_some_and(|(drawn, _)| drawn.practiced));

        session.draw(5, rng).expect("Unable to draw");
        let slot = session
            .drawn()
            .iter()
            .position(|drawn| drawn.index == index)
            .expect("Whole population draw must contain every index");
        assert_eq!(session.mark_practiced(slot), Some(before + 2));
    }

    #[test]
    fn summarize_after_practice() {
        let mut session = sample_session();
        assert_eq!(session.summarize().map(|s| s.remaining), Ok(2));

        session.increment(1);
        session.increment(1);
        session.increment(4);

        let snapshot = session.summarize().expect("Unable to summarize");
        assert_eq!(snapshot.remaining, 0);
        assert_eq!(snapshot.subjects[0].completed, 3);
        assert_eq!(snapshot.subjects[1].completed, 2);
    }

    #[test]
    fn empty_session() {
        let rng = &mut StdRng::seed_from_u64(0);
        let mut session = Session::empty();

        assert_eq!(session.draw(0, rng).map(|drawn| drawn.len()), Ok(0));
        assert!(session.draw(1, rng).is_err());
        assert_eq!(session.mark_practiced(0), None);
        assert!(session
            .summarize()
            .is_ok_and(|snapshot| snapshot.total == 0 && snapshot.remaining == 0));
    }

    #[test]
    fn export_unqualified_item() {
        let session = Session::new(vec![PracticeItem::new("Algebra", 0)]);
        assert!(session
            .export("./tests/out/export_unqualified_item.json")
            .is_err_and(|err| matches!(err, ExportError::Name(_))));
    }
}
