use std::collections::HashSet;
use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::domain::entities::experience::Experience;
use crate::domain::entities::id::Id;

/// Free-form details attached to a profile. Only these keys are recognized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Information {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Id<Profile>,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,
    pub information: Information,
    pub friends: Vec<Id<Profile>>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn new(
        name: String,
        email: String,
        skills: Vec<String>,
        information: Information,
        experience: Vec<Experience>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Id::generate(),
            name,
            email,
            skills: unique(skills),
            experience: Experience::with_unique_ids(experience),
            information,
            friends: Vec::new(),
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Reduced projection used when resolving friend references.
#[derive(Debug, Clone, PartialEq)]
pub struct FriendSummary {
    pub id: Id<Profile>,
    pub name: String,
    pub email: String,
}

/// Fields replaced wholesale by a partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<Vec<Experience>>,
    pub information: Option<Information>,
    pub friends: Option<Vec<Id<Profile>>>,
}

impl ProfilePatch {
    pub fn information(information: Information) -> Self {
        Self {
            information: Some(information),
            ..Default::default()
        }
    }

    /// Collapses duplicates in set-like fields and re-keys clashing experience ids.
    pub fn normalized(self) -> Self {
        Self {
            skills: self.skills.map(unique),
            friends: self.friends.map(unique),
            experience: self.experience.map(Experience::with_unique_ids),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.skills.is_none()
            && self.experience.is_none()
            && self.information.is_none()
            && self.friends.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFilter {
    /// Matches when the profile has at least one of these skills.
    pub skills: Option<Vec<String>>,
    /// Case-insensitive substring of `information.location`.
    pub location: Option<String>,
}

/// Drops repeated items, keeping the first occurrence of each.
pub fn unique<T: Eq + Hash + Clone>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::domain::entities::experience::Experience;
    use crate::domain::entities::id::Id;
    use crate::domain::entities::profile::{unique, Information, Profile, ProfilePatch};

    fn experience(title: &str) -> Experience {
        Experience::new(Some(title.to_string()), None, None, None)
    }

    #[rstest]
    fn test_new_profile_defaults() {
        let profile = Profile::new(
            "Ana".to_string(),
            "ana@x.com".to_string(),
            vec![],
            Information::default(),
            vec![],
        );

        assert!(!profile.is_deleted);
        assert!(profile.skills.is_empty());
        assert!(profile.friends.is_empty());
        assert!(profile.experience.is_empty());
        assert_eq!(profile.created_at, profile.updated_at);
    }

    #[rstest]
    fn test_new_profile_dedups_skills() {
        let profile = Profile::new(
            "Ana".to_string(),
            "ana@x.com".to_string(),
            vec!["go".to_string(), "rust".to_string(), "go".to_string()],
            Information::default(),
            vec![],
        );

        assert_eq!(profile.skills, vec!["go".to_string(), "rust".to_string()]);
    }

    #[rstest]
    #[case(vec![], vec![])]
    #[case(vec!["a", "b"], vec!["a", "b"])]
    #[case(vec!["b", "a", "b", "a"], vec!["b", "a"])]
    fn test_unique_keeps_first_occurrence(#[case] input: Vec<&str>, #[case] expected: Vec<&str>) {
        assert_eq!(unique(input), expected);
    }

    #[rstest]
    fn test_patch_normalized_dedups_friends_and_experience_ids() {
        let friend: Id<Profile> = Id::generate();
        let first = experience("Eng");
        let mut clash = experience("Lead");
        clash.id = first.id.clone();

        let patch = ProfilePatch {
            friends: Some(vec![friend.clone(), friend.clone()]),
            experience: Some(vec![first.clone(), clash]),
            ..Default::default()
        }
        .normalized();

        assert_eq!(patch.friends.unwrap(), vec![friend]);
        let experience = patch.experience.unwrap();
        assert_eq!(experience.len(), 2);
        assert_eq!(experience[0].id, first.id);
        assert_ne!(experience[1].id, first.id);
    }

    #[rstest]
    fn test_patch_is_empty() {
        assert!(ProfilePatch::default().is_empty());
        assert!(!ProfilePatch::information(Information::default()).is_empty());
    }
}
