use serde::{Deserialize, Serialize};

/// The single shared document holding every displayable and editable piece
/// of site content. Stored as one JSON row; field names follow the stored
/// layout (camelCase). All fields carry serde defaults so documents written
/// before a field existed still deserialize.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioDocument {
    pub hero: Hero,
    pub about: About,
    pub projects: Vec<Project>,
    pub resumes: Vec<Resume>,
    pub contact: Contact,
    pub settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Hero {
    pub name: String,
    /// Role segments delimited by a literal `|`.
    pub title: String,
    pub description: String,
    pub visible: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct About {
    pub content: String,
    pub skill_categories: Vec<SkillCategory>,
    pub visible: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillCategory {
    pub category: String,
    // Free text, duplicates across categories are allowed.
    pub skills: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    /// Creation-timestamp-derived, unique within the collection.
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Inline data URI or external URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_link: Option<String>,
    pub additional_files: Vec<ProjectFile>,
    pub visible: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectFile {
    pub name: String,
    pub url: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Resume {
    pub id: i64,
    pub title: String,
    /// Opaque Google Drive file identifier; reachability is not validated.
    pub drive_file_id: String,
    pub visible: bool,
}

impl Resume {
    pub fn preview_url(&self) -> String {
        format!("https://drive.google.com/file/d/{}/preview", self.drive_file_id)
    }

    pub fn download_url(&self) -> String {
        format!(
            "https://drive.google.com/uc?export=download&id={}",
            self.drive_file_id
        )
    }
}

/// Schema-fixed contact channels. Not extensible at runtime.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub personal_email: ContactEntry,
    pub org_email: ContactEntry,
    pub phone: ContactEntry,
    pub linkedin: ContactEntry,
    pub github: ContactEntry,
    pub instagram: ContactEntry,
    pub twitter: ContactEntry,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactEntry {
    pub value: String,
    pub visible: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub show_resume: bool,
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            title: "Data Analyst | Business Analyst | Data Scientist".to_string(),
            description: "Recent graduate passionate about turning data into actionable \
                          insights. Experienced in data analysis, visualization, and machine \
                          learning."
                .to_string(),
            visible: true,
        }
    }
}

impl Default for About {
    fn default() -> Self {
        let categories = [
            ("Languages", vec!["Python", "R", "SQL", "HTML", "JavaScript", "C"]),
            (
                "Database",
                vec!["MongoDB", "Firebase", "MySQL", "Oracle", "PostgreSQL", "SQLite"],
            ),
            (
                "Tools",
                vec![
                    "Tableau",
                    "MySQL Workbench",
                    "AWS Glue",
                    "Microsoft Excel",
                    "Power BI",
                    "Salesforce",
                    "JIRA",
                    "Power Apps",
                    "Power Automate",
                    "SharePoint",
                ],
            ),
            (
                "Libraries",
                vec![
                    "pandas",
                    "seaborn",
                    "matplotlib",
                    "scikit-learn",
                    "scipy",
                    "TensorFlow",
                    "Keras",
                    "PyTorch",
                    "plotly",
                    "dash",
                    "geopandas",
                    "ArcGIS",
                ],
            ),
            (
                "Frameworks & Methodologies",
                vec!["Agile", "Scrum", "Sprint Planning", "Stand-ups", "Retrospectives"],
            ),
            ("Big Data & Cloud", vec!["AWS Glue", "Spark", "Hadoop"]),
        ];

        Self {
            content: "I'm a recent graduate with a strong foundation in data analytics and \
                      business intelligence. My experience spans across data engineering, \
                      statistical analysis, and machine learning. I'm passionate about solving \
                      complex problems with data-driven solutions."
                .to_string(),
            skill_categories: categories
                .into_iter()
                .map(|(category, skills)| SkillCategory {
                    category: category.to_string(),
                    skills: skills.into_iter().map(str::to_string).collect(),
                })
                .collect(),
            visible: true,
        }
    }
}

impl Default for ContactEntry {
    fn default() -> Self {
        Self {
            value: String::new(),
            visible: true,
        }
    }
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            personal_email: ContactEntry::default(),
            org_email: ContactEntry::default(),
            phone: ContactEntry::default(),
            linkedin: ContactEntry::default(),
            github: ContactEntry::default(),
            instagram: ContactEntry::default(),
            twitter: ContactEntry::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self { show_resume: true }
    }
}

impl Default for PortfolioDocument {
    fn default() -> Self {
        Self {
            hero: Hero::default(),
            about: About::default(),
            projects: Vec::new(),
            resumes: Vec::new(),
            contact: Contact::default(),
            settings: Settings::default(),
        }
    }
}
