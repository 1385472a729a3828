//! The fixed set of photo-shoot categories.
//!
//! Categories are the partition key for everything: input folders, output
//! folders, output filenames, and the top-level keys of the manifest. The set
//! is closed; a folder or manifest key that does not name one of these is
//! ignored rather than invented on the fly.
//!
//! Declaration order is significant: it is the `Ord` used by the manifest's
//! `BTreeMap`, so a written manifest always lists categories in this order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    FirstBirthday,
    MusicConcert,
    FamilySession,
    HouseWarming,
    Maternity,
    Newborn,
    Portraits,
    Wedding,
}

impl Category {
    /// Every category, in manifest order.
    pub const ALL: [Category; 8] = [
        Category::FirstBirthday,
        Category::MusicConcert,
        Category::FamilySession,
        Category::HouseWarming,
        Category::Maternity,
        Category::Newborn,
        Category::Portraits,
        Category::Wedding,
    ];

    /// The identifier used for folder names, filenames and manifest keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::FirstBirthday => "firstbirthday",
            Category::MusicConcert => "musicconcert",
            Category::FamilySession => "familysession",
            Category::HouseWarming => "housewarming",
            Category::Maternity => "maternity",
            Category::Newborn => "newborn",
            Category::Portraits => "portraits",
            Category::Wedding => "wedding",
        }
    }

    /// Human-facing heading, e.g. "1st Birthday".
    pub fn display_name(self) -> &'static str {
        match self {
            Category::FirstBirthday => "1st Birthday",
            Category::MusicConcert => "Music Concert",
            Category::FamilySession => "Family Session",
            Category::HouseWarming => "House Warming",
            Category::Maternity => "Maternity",
            Category::Newborn => "Newborn",
            Category::Portraits => "Portraits",
            Category::Wedding => "Wedding",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::FirstBirthday => "Magical first birthday celebrations captured forever",
            Category::MusicConcert => "Live performances and musical moments in stunning detail",
            Category::FamilySession => "Authentic family moments captured in natural settings",
            Category::HouseWarming => "Celebrating new beginnings in your dream home",
            Category::Maternity => "Beautiful maternity portraits celebrating motherhood",
            Category::Newborn => "Precious first moments of your little one's journey",
            Category::Portraits => "Professional portraits that capture your unique essence",
            Category::Wedding => "Your love story captured in timeless wedding photography",
        }
    }

    /// The identifier with its first letter upper-cased ("Firstbirthday").
    ///
    /// This is the label baked into generic alt text, not the display name.
    pub fn label(self) -> String {
        let id = self.as_str();
        let mut chars = id.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}
