use crate::analysis::preference::{analyze, Preference};
use crate::catalog::{Catalog, ChampionRecord};
use chrono::{DateTime, Utc};
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Presenting(usize),
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Smash,
    Pass,
    /// Every image candidate failed. Scores like a pass.
    ErrorSkip,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("no champion is being presented")]
    NotPresenting,

    #[error("a session is already running, reset it first")]
    AlreadyStarted,

    #[error("champion {0} is not in the catalog")]
    UnknownChampion(String),
}

#[derive(Debug, Clone)]
pub struct SessionResults {
    pub accepted: usize,
    pub total: usize,
    pub skipped: usize,
    pub preference: Preference,
    pub duration: Option<chrono::Duration>,
}

/// One play-through over a shuffled champion list.
pub struct Session<'a> {
    catalog: &'a Catalog,
    phase: Phase,
    list: Vec<String>,
    cursor: usize,
    accepted: Vec<Rc<ChampionRecord>>,
    skipped: usize,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl<'a> Session<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Session {
            catalog,
            phase: Phase::Setup,
            list: Vec::new(),
            cursor: 0,
            accepted: Vec::new(),
            skipped: 0,
            started_at: None,
            finished_at: None,
        }
    }

    /// Replaces the session list and clears every score. Only valid from setup.
    pub fn start(&mut self, list: Vec<String>) -> Result<(), SessionError> {
        if self.phase != Phase::Setup {
            return Err(SessionError::AlreadyStarted);
        }
        if let Some(unknown) = list.iter().find(|id| self.catalog.get(id).is_none()) {
            return Err(SessionError::UnknownChampion(unknown.clone()));
        }

        self.list = list;
        self.cursor = 0;
        self.accepted.clear();
        self.skipped = 0;
        self.started_at = Some(Utc::now());
        self.finished_at = None;

        if self.list.is_empty() {
            self.finish();
        } else {
            self.phase = Phase::Presenting(0);
        }

        Ok(())
    }

    pub fn decide(&mut self, choice: Choice) -> Result<Phase, SessionError> {
        let index = match self.phase {
            Phase::Presenting(index) if index < self.list.len() => index,
            _ => return Err(SessionError::NotPresenting),
        };

        match choice {
            Choice::Smash => {
                let id = &self.list[index];
                let record = self
                    .catalog
                    .get(id)
                    .ok_or_else(|| SessionError::UnknownChampion(id.clone()))?;
                self.accepted.push(Rc::clone(record));
            }
            Choice::Pass => {}
            Choice::ErrorSkip => {
                tracing::error!(champion = %self.list[index], "no image could be loaded, skipping");
                self.skipped += 1;
            }
        }

        self.cursor += 1;
        if self.cursor == self.list.len() {
            self.finish();
        } else {
            self.phase = Phase::Presenting(self.cursor);
        }

        Ok(self.phase)
    }

    /// Back to setup from any phase. The catalog is kept.
    pub fn reset(&mut self) {
        self.phase = Phase::Setup;
    }

    fn finish(&mut self) {
        self.phase = Phase::Finished;
        self.finished_at = Some(Utc::now());
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.list.len()
    }

    pub fn current_id(&self) -> Option<&str> {
        match self.phase {
            Phase::Presenting(index) => self.list.get(index).map(String::as_str),
            _ => None,
        }
    }

    pub fn current(&self) -> Option<&Rc<ChampionRecord>> {
        self.current_id().and_then(|id| self.catalog.get(id))
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn accepted(&self) -> &[Rc<ChampionRecord>] {
        &self.accepted
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Final tally, available once the list is exhausted.
    pub fn results(&self) -> Option<SessionResults> {
        if self.phase != Phase::Finished {
            return None;
        }

        let duration = match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some(end.signed_duration_since(start)),
            _ => None,
        };

        Some(SessionResults {
            accepted: self.accepted.len(),
            total: self.list.len(),
            skipped: self.skipped,
            preference: analyze(&self.accepted),
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_catalog;
    use crate::game::filter::filter_champions;
    use rand::{rngs::StdRng, SeedableRng};

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn starts_in_setup() {
        let catalog = sample_catalog();
        let session = Session::new(&catalog);

        assert_eq!(session.phase(), Phase::Setup);
        assert_eq!(session.current_id(), None);
        assert!(session.results().is_none());
    }

    #[test]
    fn start_presents_first_champion() {
        let catalog = sample_catalog();
        let mut session = Session::new(&catalog);

        session.start(ids(&["C", "A"])).unwrap();

        assert_eq!(session.phase(), Phase::Presenting(0));
        assert_eq!(session.current_id(), Some("C"));
        assert_eq!(session.current().unwrap().name, "Charlie");
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.total(), 2);
    }

    #[test]
    fn smash_counts_pass_and_skip_do_not() {
        let catalog = sample_catalog();
        let mut session = Session::new(&catalog);
        session.start(ids(&["A", "B", "C"])).unwrap();

        session.decide(Choice::Pass).unwrap();
        assert_eq!(session.accepted_count(), 0);
        session.decide(Choice::Smash).unwrap();
        assert_eq!(session.accepted_count(), 1);
        session.decide(Choice::ErrorSkip).unwrap();
        assert_eq!(session.accepted_count(), 1);

        assert_eq!(session.skipped(), 1);
        assert_eq!(session.accepted()[0].id, "B");
    }

    #[test]
    fn cursor_is_monotonic_and_bounded() {
        let catalog = sample_catalog();
        let mut session = Session::new(&catalog);
        session.start(ids(&["A", "B", "C"])).unwrap();

        let mut last = session.cursor();
        for choice in [Choice::Smash, Choice::Pass, Choice::ErrorSkip, Choice::Smash, Choice::Pass] {
            let _ = session.decide(choice);
            assert!(session.cursor() >= last);
            assert!(session.cursor() <= session.total());
            last = session.cursor();
        }
        assert_eq!(session.cursor(), 3);
    }

    #[test]
    fn finishes_exactly_at_end_of_list() {
        let catalog = sample_catalog();
        let mut session = Session::new(&catalog);
        session.start(ids(&["A", "B"])).unwrap();

        assert_eq!(session.decide(Choice::Pass).unwrap(), Phase::Presenting(1));
        assert_eq!(session.decide(Choice::Pass).unwrap(), Phase::Finished);
        assert_eq!(session.cursor(), session.total());
    }

    #[test]
    fn decide_is_rejected_outside_presenting() {
        let catalog = sample_catalog();
        let mut session = Session::new(&catalog);

        assert_eq!(session.decide(Choice::Smash), Err(SessionError::NotPresenting));

        session.start(ids(&["A"])).unwrap();
        session.decide(Choice::Smash).unwrap();
        assert_eq!(session.decide(Choice::Smash), Err(SessionError::NotPresenting));
        assert_eq!(session.accepted_count(), 1);
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn start_is_rejected_until_reset() {
        let catalog = sample_catalog();
        let mut session = Session::new(&catalog);
        session.start(ids(&["A", "B"])).unwrap();
        session.decide(Choice::Smash).unwrap();

        assert_eq!(session.start(ids(&["C"])), Err(SessionError::AlreadyStarted));
        assert_eq!(session.phase(), Phase::Presenting(1));
        assert_eq!(session.current_id(), Some("B"));
        assert_eq!(session.accepted_count(), 1);

        session.decide(Choice::Pass).unwrap();
        assert_eq!(session.start(ids(&["C"])), Err(SessionError::AlreadyStarted));
        assert_eq!(session.phase(), Phase::Finished);

        session.reset();
        session.start(ids(&["C"])).unwrap();
        assert_eq!(session.current_id(), Some("C"));
    }

    #[test]
    fn category_game_works_when_keys_differ_from_ids() {
        let json = r#"{ "data": { "MonkeyKing": { "id": "Wukong", "name": "Wukong", "title": "the Monkey King", "tags": ["Fighter"] } } }"#;
        let catalog = Catalog::from_dto(serde_json::from_str(json).unwrap());
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = Session::new(&catalog);

        session.start(filter_champions(&catalog, "Fighter", &mut rng)).unwrap();
        session.decide(Choice::Smash).unwrap();

        assert_eq!(session.accepted()[0].name, "Wukong");
        assert_eq!(session.results().unwrap().preference.dominant_tag.as_deref(), Some("Fighter"));
    }

    #[test]
    fn start_rejects_unknown_champion() {
        let catalog = sample_catalog();
        let mut session = Session::new(&catalog);

        assert_eq!(
            session.start(ids(&["A", "Nope"])),
            Err(SessionError::UnknownChampion("Nope".to_string()))
        );
        assert_eq!(session.phase(), Phase::Setup);
    }

    #[test]
    fn category_scenario_ends_on_shared_tag() {
        let catalog = sample_catalog();
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = Session::new(&catalog);

        let list = filter_champions(&catalog, "X", &mut rng);
        let mut sorted = list.clone();
        sorted.sort();
        assert_eq!(sorted, vec!["A", "B"]);

        session.start(list).unwrap();
        session.decide(Choice::Smash).unwrap();
        session.decide(Choice::Smash).unwrap();

        assert_eq!(session.phase(), Phase::Finished);
        let mut accepted: Vec<&str> = session.accepted().iter().map(|r| r.id.as_str()).collect();
        accepted.sort();
        assert_eq!(accepted, vec!["A", "B"]);

        let results = session.results().unwrap();
        assert_eq!(results.accepted, 2);
        assert_eq!(results.total, 2);
        assert_eq!(results.preference.dominant_tag.as_deref(), Some("X"));
        assert_eq!(results.preference.count, 2);
    }

    #[test]
    fn empty_category_finishes_immediately() {
        let catalog = sample_catalog();
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = Session::new(&catalog);

        let list = filter_champions(&catalog, "Support", &mut rng);
        assert!(list.is_empty());
        session.start(list).unwrap();

        assert_eq!(session.phase(), Phase::Finished);
        let results = session.results().unwrap();
        assert_eq!(results.preference.dominant_tag, None);
        assert_eq!(results.preference.count, 0);
    }

    #[test]
    fn reset_then_restart_is_independent() {
        let catalog = sample_catalog();
        let mut rng = StdRng::seed_from_u64(11);
        let mut session = Session::new(&catalog);

        session.start(filter_champions(&catalog, "X", &mut rng)).unwrap();
        session.decide(Choice::Smash).unwrap();
        session.decide(Choice::Smash).unwrap();
        assert_eq!(session.phase(), Phase::Finished);

        session.reset();
        assert_eq!(session.phase(), Phase::Setup);
        assert_eq!(catalog.len(), 3);

        session.start(filter_champions(&catalog, "Y", &mut rng)).unwrap();
        assert_eq!(session.phase(), Phase::Presenting(0));
        assert_eq!(session.accepted_count(), 0);
        assert_eq!(session.cursor(), 0);
        let first = session.current_id().unwrap().to_string();
        session.decide(Choice::Pass).unwrap();
        let second = session.current_id().unwrap().to_string();
        let mut replayed = vec![first, second];
        replayed.sort();
        assert_eq!(replayed, vec!["B", "C"]);
    }

    #[test]
    fn reset_mid_session_returns_to_setup() {
        let catalog = sample_catalog();
        let mut session = Session::new(&catalog);
        session.start(ids(&["A", "B"])).unwrap();
        session.decide(Choice::Smash).unwrap();

        session.reset();

        assert_eq!(session.phase(), Phase::Setup);
        assert_eq!(session.current_id(), None);
        assert_eq!(session.decide(Choice::Pass), Err(SessionError::NotPresenting));
    }
}
