use chrono::{DateTime, Utc};

use crate::domain::entities::experience::Experience;
use crate::domain::entities::profile::{FriendSummary, Information, Profile};

#[derive(Debug, Clone, Default)]
pub struct ListProfilesDTO {
    pub skills: Option<Vec<String>>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InformationDTO {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

/// Experience as supplied by a client; `id` is kept only when replacing the whole list.
#[derive(Debug, Clone, Default)]
pub struct ExperienceInputDTO {
    pub id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub dates: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateProfileDTO {
    pub name: Option<String>,
    pub email: Option<String>,
    pub skills: Vec<String>,
    pub information: InformationDTO,
    pub experience: Vec<ExperienceInputDTO>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProfileDTO {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<Vec<ExperienceInputDTO>>,
    pub information: Option<InformationDTO>,
    pub friends: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct UpdateInformationDTO {
    pub profile_id: String,
    pub information: InformationDTO,
}

#[derive(Debug, Clone)]
pub struct AddExperienceDTO {
    pub profile_id: String,
    pub experience: ExperienceInputDTO,
}

#[derive(Debug, Clone)]
pub struct DeleteExperienceDTO {
    pub profile_id: String,
    pub experience_id: String,
}

#[derive(Debug, Clone)]
pub struct SkillDTO {
    pub profile_id: String,
    pub skill: String,
}

#[derive(Debug, Clone)]
pub struct FriendDTO {
    pub profile_id: String,
    pub friend_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceDTO {
    pub id: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub dates: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FriendSummaryDTO {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct ProfileDTO {
    pub id: String,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceDTO>,
    pub information: InformationDTO,
    pub friends: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile with friend references resolved to summaries.
#[derive(Debug, Clone)]
pub struct ProfileDetailsDTO {
    pub id: String,
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceDTO>,
    pub information: InformationDTO,
    pub friends: Vec<FriendSummaryDTO>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Information> for InformationDTO {
    fn from(information: Information) -> Self {
        Self {
            bio: information.bio,
            location: information.location,
            website: information.website,
        }
    }
}

impl From<InformationDTO> for Information {
    fn from(dto: InformationDTO) -> Self {
        Self {
            bio: dto.bio,
            location: dto.location,
            website: dto.website,
        }
    }
}

impl From<Experience> for ExperienceDTO {
    fn from(experience: Experience) -> Self {
        Self {
            id: experience.id.to_string(),
            title: experience.title,
            company: experience.company,
            dates: experience.dates,
            description: experience.description,
        }
    }
}

impl From<FriendSummary> for FriendSummaryDTO {
    fn from(summary: FriendSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name,
            email: summary.email,
        }
    }
}

impl From<Profile> for ProfileDTO {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name,
            email: profile.email,
            skills: profile.skills,
            experience: profile.experience.into_iter().map(ExperienceDTO::from).collect(),
            information: profile.information.into(),
            friends: profile.friends.iter().map(ToString::to_string).collect(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl ProfileDetailsDTO {
    pub fn new(profile: Profile, friends: Vec<FriendSummary>) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name,
            email: profile.email,
            skills: profile.skills,
            experience: profile.experience.into_iter().map(ExperienceDTO::from).collect(),
            information: profile.information.into(),
            friends: friends.into_iter().map(FriendSummaryDTO::from).collect(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
