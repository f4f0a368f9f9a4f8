use crate::catalog::ChampionRecord;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Tag occurrences across accepted champions, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTally {
    entries: Vec<TagCount>,
}

impl TagTally {
    pub fn from_records(records: &[Rc<ChampionRecord>]) -> Self {
        let mut tally = TagTally::default();
        for record in records {
            for tag in &record.tags {
                tally.add(tag);
            }
        }
        tally
    }

    pub fn add(&mut self, tag: &str) {
        match self.entries.iter_mut().find(|entry| entry.tag == tag) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(TagCount {
                tag: tag.to_string(),
                count: 1,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest count wins; on a tie the tag seen first keeps the lead.
    pub fn leader(&self) -> Option<&TagCount> {
        let mut best: Option<&TagCount> = None;
        for entry in &self.entries {
            if best.map_or(true, |b| entry.count > b.count) {
                best = Some(entry);
            }
        }
        best
    }

    /// Entries by descending count, ties in first-occurrence order.
    pub fn ranked(&self) -> Vec<TagCount> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preference {
    pub dominant_tag: Option<String>,
    pub count: usize,
    pub tally: TagTally,
}

pub fn analyze(accepted: &[Rc<ChampionRecord>]) -> Preference {
    if accepted.is_empty() {
        return Preference::default();
    }

    let tally = TagTally::from_records(accepted);
    let (dominant_tag, count) = match tally.leader() {
        Some(leader) => (Some(leader.tag.clone()), leader.count),
        None => (None, 0),
    };

    Preference {
        dominant_tag,
        count,
        tally,
    }
}
