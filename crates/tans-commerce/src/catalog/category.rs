//! Card categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;

/// The fixed set of card categories sold by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Wedding,
    Birthday,
    Business,
    #[serde(rename = "Thank You")]
    ThankYou,
    Holiday,
    Anniversary,
    Graduation,
    #[serde(rename = "Baby Shower")]
    BabyShower,
}

impl Category {
    /// Every category, in menu order.
    pub const ALL: [Category; 8] = [
        Category::Wedding,
        Category::Birthday,
        Category::Business,
        Category::ThankYou,
        Category::Holiday,
        Category::Anniversary,
        Category::Graduation,
        Category::BabyShower,
    ];

    /// Display name, as shown on product badges.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Wedding => "Wedding",
            Category::Birthday => "Birthday",
            Category::Business => "Business",
            Category::ThankYou => "Thank You",
            Category::Holiday => "Holiday",
            Category::Anniversary => "Anniversary",
            Category::Graduation => "Graduation",
            Category::BabyShower => "Baby Shower",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CommerceError;

    /// Case-insensitive; spaces, dashes and underscores are ignored
    /// ("thank-you", "Thank You" and "thankyou" all parse).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        Category::ALL
            .into_iter()
            .find(|c| c.as_str().replace(' ', "").to_lowercase() == key)
            .ok_or_else(|| CommerceError::UnknownCategory(s.to_string()))
    }
}

/// Category filter used by the product listing ("All" plus one button per category).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}
