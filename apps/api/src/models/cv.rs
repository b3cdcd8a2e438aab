//! Master CV record: the single source of truth every generated document is built from.
//!
//! Every field defaults to empty when absent or `null`, so a partially filled record
//! (fresh sign-up, AI parse with gaps) always deserializes and always compiles.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CvRecord {
    #[serde(alias = "personalInfo", deserialize_with = "null_as_default")]
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "null_as_default")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Skills,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub linkedin: String,
    #[serde(deserialize_with = "null_as_default")]
    pub github: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    #[serde(deserialize_with = "null_as_default")]
    pub institution: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub degree: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dates: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dates: String,
    #[serde(deserialize_with = "null_as_default")]
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub technologies: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dates: String,
    /// Deployed project or demo URL. Empty means "no link".
    #[serde(alias = "demoLink", deserialize_with = "null_as_default")]
    pub demo_link: String,
    #[serde(deserialize_with = "null_as_default")]
    pub points: Vec<String>,
}

/// Skill categories. Display order within a category is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    #[serde(deserialize_with = "null_as_default")]
    pub languages: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub frameworks: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tools: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub libraries: Vec<String>,
}

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
            && self.frameworks.is_empty()
            && self.tools.is_empty()
            && self.libraries.is_empty()
    }
}

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
