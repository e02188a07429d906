use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of an authenticated user, job seeker or employer alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role attached to an actor by the identity service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorRole {
    #[serde(rename = "Job Seeker")]
    JobSeeker,
    Employer,
    #[serde(other)]
    Unrecognized,
}

impl ActorRole {
    /// The side of an application this role owns, if any.
    pub const fn party(self) -> Option<Party> {
        match self {
            ActorRole::JobSeeker => Some(Party::JobSeeker),
            ActorRole::Employer => Some(Party::Employer),
            ActorRole::Unrecognized => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ActorRole::JobSeeker => "Job Seeker",
            ActorRole::Employer => "Employer",
            ActorRole::Unrecognized => "Unrecognized",
        }
    }
}

/// One of the two sides holding a stake in an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    Employer,
    JobSeeker,
}

/// Stored file reference returned by blob storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAttachment {
    pub object_id: String,
    pub url: String,
}

impl ResumeAttachment {
    pub fn is_present(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Authenticated user as supplied by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: ActorId,
    pub role: ActorRole,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
    #[serde(default)]
    pub niches: Vec<String>,
    #[serde(default)]
    pub resume: Option<ResumeAttachment>,
}

/// Job catalog entry; only the fields snapshotted onto an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: JobId,
    pub title: String,
    pub posted_by: ActorId,
}

/// Form fields supplied with a submission. Any of them may be missing on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub cover_letter: Option<String>,
}

/// Form fields after every required value has been confirmed present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: String,
}

impl ApplicationForm {
    /// `None` when any field is absent or blank.
    pub fn complete(self) -> Option<ContactDetails> {
        fn filled(value: Option<String>) -> Option<String> {
            value.filter(|value| !value.trim().is_empty())
        }

        Some(ContactDetails {
            name: filled(self.name)?,
            email: filled(self.email)?,
            phone: filled(self.phone)?,
            address: filled(self.address)?,
            cover_letter: filled(self.cover_letter)?,
        })
    }
}

/// Resume file received with a submission, before it reaches blob storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSeekerInfo {
    pub id: ActorId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub cover_letter: String,
    pub resume: ResumeAttachment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerInfo {
    pub id: ActorId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    pub job_id: JobId,
    pub job_title: String,
}

/// Per-side withdrawal flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBy {
    pub employer: bool,
    pub job_seeker: bool,
}

impl DeletedBy {
    pub const ACTIVE: DeletedBy = DeletedBy {
        employer: false,
        job_seeker: false,
    };

    pub const fn by(self, party: Party) -> bool {
        match party {
            Party::Employer => self.employer,
            Party::JobSeeker => self.job_seeker,
        }
    }
}

/// A job seeker's application against one job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: ApplicationId,
    pub job_seeker_info: JobSeekerInfo,
    pub employer_info: EmployerInfo,
    pub job_info: JobInfo,
    pub deleted_by: DeletedBy,
    pub applied_on: DateTime<Utc>,
}

impl Application {
    pub fn owner(&self, party: Party) -> &ActorId {
        match party {
            Party::Employer => &self.employer_info.id,
            Party::JobSeeker => &self.job_seeker_info.id,
        }
    }

    /// Whether `party` still sees this application in its own listing.
    pub fn visible_to(&self, party: Party) -> bool {
        !self.deleted_by.by(party)
    }
}
