//! Closed tag sets: content types, pages, and chatbot character genders.

use serde::{Deserialize, Serialize};

/// Error returned when a tag string is not part of its closed set.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseKindError {
    kind: &'static str,
    value: String,
}

/// The kind of an editable content unit.
///
/// Each kind implies which type-specific fields a [`crate::ContentItem`]
/// carries; see [`crate::ContentBody`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    About,
    Service,
    Team,
    Approach,
    Contact,
    Network,
    Hero,
}

impl ContentType {
    /// Every content type, in admin display order.
    pub const ALL: [Self; 7] = [
        Self::About,
        Self::Service,
        Self::Team,
        Self::Approach,
        Self::Contact,
        Self::Network,
        Self::Hero,
    ];

    /// The tag used in stored records and URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Service => "service",
            Self::Team => "team",
            Self::Approach => "approach",
            Self::Contact => "contact",
            Self::Network => "network",
            Self::Hero => "hero",
        }
    }

    /// Human-readable label for admin forms.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Service => "Service",
            Self::Team => "Team Member",
            Self::Approach => "Approach",
            Self::Contact => "Contact",
            Self::Network => "Network",
            Self::Hero => "Hero",
        }
    }

    /// Page an item of this type belongs to when it carries no explicit page.
    ///
    /// Records written before pages existed rely on this mapping.
    #[must_use]
    pub const fn legacy_page(self) -> Page {
        match self {
            Self::Service => Page::Services,
            Self::Team => Page::Team,
            Self::About | Self::Approach | Self::Network => Page::Home,
            Self::Contact | Self::Hero => Page::Global,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseKindError {
                kind: "content type",
                value: s.to_owned(),
            })
    }
}

/// A page of the public site that content can be attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    Services,
    Team,
    Global,
}

impl Page {
    /// Every page, in navigation order.
    pub const ALL: [Self; 4] = [Self::Home, Self::Services, Self::Team, Self::Global];

    /// The tag used in stored records and forms.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Services => "services",
            Self::Team => "team",
            Self::Global => "global",
        }
    }

    /// Content types that have a dedicated section on this page.
    ///
    /// Items of any other type attached to the page render generically.
    #[must_use]
    pub const fn named_sections(self) -> &'static [ContentType] {
        match self {
            Self::Home => &[
                ContentType::Hero,
                ContentType::About,
                ContentType::Approach,
                ContentType::Network,
            ],
            Self::Services => &[ContentType::Hero, ContentType::Service],
            Self::Team => &[ContentType::Hero, ContentType::Team, ContentType::Contact],
            Self::Global => &[ContentType::Hero],
        }
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Page {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| ParseKindError {
                kind: "page",
                value: s.to_owned(),
            })
    }
}

/// Presentation gender of a chatbot character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => f.write_str("male"),
            Self::Female => f.write_str("female"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_page_mapping() {
        assert_eq!(ContentType::Service.legacy_page(), Page::Services);
        assert_eq!(ContentType::Team.legacy_page(), Page::Team);
        assert_eq!(ContentType::About.legacy_page(), Page::Home);
        assert_eq!(ContentType::Approach.legacy_page(), Page::Home);
        assert_eq!(ContentType::Network.legacy_page(), Page::Home);
        assert_eq!(ContentType::Contact.legacy_page(), Page::Global);
        assert_eq!(ContentType::Hero.legacy_page(), Page::Global);
    }

    #[test]
    fn test_content_type_round_trips_through_str() {
        for kind in ContentType::ALL {
            assert_eq!(kind.as_str().parse::<ContentType>().unwrap(), kind);
        }
        assert!("blog".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_page_from_str() {
        assert_eq!("services".parse::<Page>().unwrap(), Page::Services);
        let err = "admin".parse::<Page>().unwrap_err();
        assert_eq!(err.to_string(), "invalid page: admin");
    }

    #[test]
    fn test_every_page_names_the_hero_section() {
        for page in Page::ALL {
            assert!(page.named_sections().contains(&ContentType::Hero));
        }
    }

    #[test]
    fn test_serde_tags_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&ContentType::Approach).unwrap(),
            "\"approach\""
        );
        assert_eq!(serde_json::to_string(&Page::Global).unwrap(), "\"global\"");
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"female\"");
    }
}
