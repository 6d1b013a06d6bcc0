use serde::{Deserialize, Serialize};

use super::document::{
    About, Contact, ContactEntry, Hero, PortfolioDocument, Project, ProjectFile, Resume, Settings,
    SkillCategory,
};

/// A shallow partial update for one top-level section of the document.
/// Only the fields present in the patch replace the corresponding section
/// fields; everything else in the section is left untouched. This is a
/// shallow merge: a present contact channel replaces that channel's whole
/// `{value, visible}` sub-object, it is never merged field by field.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionPatch {
    Hero(HeroPatch),
    About(AboutPatch),
    Contact(ContactPatch),
    Settings(SettingsPatch),
}

#[derive(Debug, Clone)]
pub enum SectionPatchError {
    UnknownSection(String),
    InvalidPayload(String),
}

impl std::fmt::Display for SectionPatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionPatchError::UnknownSection(name) => write!(f, "Unknown section: {}", name),
            SectionPatchError::InvalidPayload(msg) => write!(f, "Invalid section payload: {}", msg),
        }
    }
}

impl std::error::Error for SectionPatchError {}

impl SectionPatch {
    /// Builds a typed patch from a section name and its raw JSON body.
    /// The collections (`projects`, `resumes`) are not sections; they have
    /// their own element-addressed operations.
    pub fn from_section_value(
        section: &str,
        body: serde_json::Value,
    ) -> Result<Self, SectionPatchError> {
        let invalid = |e: serde_json::Error| SectionPatchError::InvalidPayload(e.to_string());

        match section {
            "hero" => Ok(SectionPatch::Hero(
                serde_json::from_value(body).map_err(invalid)?,
            )),
            "about" => Ok(SectionPatch::About(
                serde_json::from_value(body).map_err(invalid)?,
            )),
            "contact" => Ok(SectionPatch::Contact(
                serde_json::from_value(body).map_err(invalid)?,
            )),
            "settings" => Ok(SectionPatch::Settings(
                serde_json::from_value(body).map_err(invalid)?,
            )),
            other => Err(SectionPatchError::UnknownSection(other.to_string())),
        }
    }

    pub fn apply(self, document: &mut PortfolioDocument) {
        match self {
            SectionPatch::Hero(patch) => patch.apply(&mut document.hero),
            SectionPatch::About(patch) => patch.apply(&mut document.about),
            SectionPatch::Contact(patch) => patch.apply(&mut document.contact),
            SectionPatch::Settings(patch) => patch.apply(&mut document.settings),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroPatch {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub visible: Option<bool>,
}

impl HeroPatch {
    pub fn apply(self, hero: &mut Hero) {
        if let Some(name) = self.name {
            hero.name = name;
        }
        if let Some(title) = self.title {
            hero.title = title;
        }
        if let Some(description) = self.description {
            hero.description = description;
        }
        if let Some(visible) = self.visible {
            hero.visible = visible;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutPatch {
    pub content: Option<String>,
    /// Replaces the whole ordered sequence when present.
    pub skill_categories: Option<Vec<SkillCategory>>,
    pub visible: Option<bool>,
}

impl AboutPatch {
    pub fn apply(self, about: &mut About) {
        if let Some(content) = self.content {
            about.content = content;
        }
        if let Some(skill_categories) = self.skill_categories {
            about.skill_categories = skill_categories;
        }
        if let Some(visible) = self.visible {
            about.visible = visible;
        }
    }
}

/// Each present channel replaces that channel's full sub-object. Callers
/// changing only `visible` must send the previous `value` along with it,
/// or it is lost (documented shallow-merge rule).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPatch {
    pub personal_email: Option<ContactEntry>,
    pub org_email: Option<ContactEntry>,
    pub phone: Option<ContactEntry>,
    pub linkedin: Option<ContactEntry>,
    pub github: Option<ContactEntry>,
    pub instagram: Option<ContactEntry>,
    pub twitter: Option<ContactEntry>,
}

impl ContactPatch {
    pub fn apply(self, contact: &mut Contact) {
        if let Some(entry) = self.personal_email {
            contact.personal_email = entry;
        }
        if let Some(entry) = self.org_email {
            contact.org_email = entry;
        }
        if let Some(entry) = self.phone {
            contact.phone = entry;
        }
        if let Some(entry) = self.linkedin {
            contact.linkedin = entry;
        }
        if let Some(entry) = self.github {
            contact.github = entry;
        }
        if let Some(entry) = self.instagram {
            contact.instagram = entry;
        }
        if let Some(entry) = self.twitter {
            contact.twitter = entry;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub show_resume: Option<bool>,
}

impl SettingsPatch {
    pub fn apply(self, settings: &mut Settings) {
        if let Some(show_resume) = self.show_resume {
            settings.show_resume = show_resume;
        }
    }
}

/// Fields for a project about to be created; the service assigns the id
/// and forces `visible = true`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub cover_photo: Option<String>,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub additional_files: Vec<ProjectFile>,
}

impl NewProject {
    pub fn into_project(self, id: i64) -> Project {
        Project {
            id,
            title: self.title,
            description: self.description,
            cover_photo: self.cover_photo,
            github_link: self.github_link,
            live_link: self.live_link,
            additional_files: self.additional_files,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cover_photo: Option<String>,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub additional_files: Option<Vec<ProjectFile>>,
    pub visible: Option<bool>,
}

impl ProjectPatch {
    pub fn apply(self, project: &mut Project) {
        if let Some(title) = self.title {
            project.title = title;
        }
        if let Some(description) = self.description {
            project.description = Some(description);
        }
        if let Some(cover_photo) = self.cover_photo {
            project.cover_photo = Some(cover_photo);
        }
        if let Some(github_link) = self.github_link {
            project.github_link = Some(github_link);
        }
        if let Some(live_link) = self.live_link {
            project.live_link = Some(live_link);
        }
        if let Some(additional_files) = self.additional_files {
            project.additional_files = additional_files;
        }
        if let Some(visible) = self.visible {
            project.visible = visible;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewResume {
    pub title: String,
    pub drive_file_id: String,
}

impl NewResume {
    pub fn into_resume(self, id: i64) -> Resume {
        Resume {
            id,
            title: self.title,
            drive_file_id: self.drive_file_id,
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumePatch {
    pub title: Option<String>,
    pub drive_file_id: Option<String>,
    pub visible: Option<bool>,
}

impl ResumePatch {
    pub fn apply(self, resume: &mut Resume) {
        if let Some(title) = self.title {
            resume.title = title;
        }
        if let Some(drive_file_id) = self.drive_file_id {
            resume.drive_file_id = drive_file_id;
        }
        if let Some(visible) = self.visible {
            resume.visible = visible;
        }
    }
}
