use serde::{Deserialize, Serialize};

/// Installable operating system images, supplied once at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OsCatalog {
    identifiers: Vec<String>,
}

impl OsCatalog {
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, os: &str) -> bool {
        self.identifiers.iter().any(|el| el == os)
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }
}

impl Default for OsCatalog {
    fn default() -> Self {
        Self::new([
            "ubuntu-22.04",
            "ubuntu-20.04",
            "ubuntu-18.04",
            "debian-12",
            "debian-11",
            "debian-10",
            "centos-7",
            "centos-8",
            "windows-xp",
            "windows-7",
            "windows-vista",
            "windows-10",
            "windows-11",
        ])
    }
}
