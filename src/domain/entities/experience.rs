use std::collections::HashSet;

use crate::domain::entities::id::Id;

/// Work history entry embedded in a profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Experience {
    pub id: Id<Experience>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub dates: Option<String>,
    pub description: Option<String>,
}

impl Experience {
    pub fn new(
        title: Option<String>,
        company: Option<String>,
        dates: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: Id::generate(),
            title,
            company,
            dates,
            description,
        }
    }

    /// Keeps entry order; any entry whose id was already used gets a fresh one.
    pub fn with_unique_ids(entries: Vec<Experience>) -> Vec<Experience> {
        let mut seen = HashSet::with_capacity(entries.len());
        entries
            .into_iter()
            .map(|mut entry| {
                while !seen.insert(entry.id.clone()) {
                    entry.id = Id::generate();
                }
                entry
            })
            .collect()
    }
}
