//! Display data shared by the public page templates.
//!
//! Handlers turn stored [`ContentItem`]s into these flat views so templates
//! never branch on the content body.

use noievoi_core::{ContentItem, ContentType, Step};

/// Page header: eyebrow text, heading, lead paragraph and background image.
#[derive(Debug, Clone)]
pub struct HeroView {
    pub small_text: String,
    pub title: String,
    pub description: String,
    pub image_src: String,
}

impl HeroView {
    /// Hero built from a stored item, using `default_small_text` when the
    /// item carries no eyebrow text.
    #[must_use]
    pub fn from_item(item: &ContentItem, default_small_text: &str) -> Self {
        Self {
            small_text: item
                .small_text()
                .filter(|s| !s.is_empty())
                .unwrap_or(default_small_text)
                .to_owned(),
            title: item.title.clone(),
            description: item.description.clone(),
            image_src: item.image_src.clone(),
        }
    }

    /// Stored hero if present, otherwise the built-in one.
    #[must_use]
    pub fn or_default(item: Option<&ContentItem>, default: Self) -> Self {
        match item {
            Some(item) => Self::from_item(item, &default.small_text),
            None => default,
        }
    }
}

/// One numbered step.
#[derive(Debug, Clone)]
pub struct StepView {
    pub title: String,
    pub description: String,
}

impl From<&Step> for StepView {
    fn from(step: &Step) -> Self {
        Self {
            title: step.title.clone(),
            description: step.description.clone(),
        }
    }
}

impl StepView {
    #[must_use]
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
        }
    }
}

/// A content item rendered as a generic section.
#[derive(Debug, Clone)]
pub struct SectionView {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub description: String,
    pub image_src: String,
    pub steps: Vec<StepView>,
    pub regions: Vec<String>,
}

impl From<&ContentItem> for SectionView {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id.to_string(),
            kind: item.kind().as_str().to_owned(),
            title: item.title.clone(),
            description: item.description.clone(),
            image_src: item.image_src.clone(),
            steps: item.steps().iter().map(StepView::from).collect(),
            regions: item.regions().to_vec(),
        }
    }
}

/// A service card.
#[derive(Debug, Clone)]
pub struct CardView {
    pub title: String,
    pub description: String,
    pub image_src: String,
}

impl From<&ContentItem> for CardView {
    fn from(item: &ContentItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            image_src: item.image_src.clone(),
        }
    }
}

/// A team member card linking to the member's detail page.
#[derive(Debug, Clone)]
pub struct MemberCardView {
    pub id: String,
    pub name: String,
    pub role: String,
    pub image_src: String,
}

impl MemberCardView {
    /// Card for a team item; `None` for other types.
    #[must_use]
    pub fn from_item(item: &ContentItem) -> Option<Self> {
        let member = item.team_member()?;
        Some(Self {
            id: item.id.to_string(),
            name: member.name.clone(),
            role: member.role.clone(),
            image_src: item.image_src.clone(),
        })
    }
}

/// Network regions shown when a network section lists none.
pub const DEFAULT_REGIONS: [&str; 4] = ["North America", "Europe", "Asia Pacific", "Middle East"];

/// Regions to render for a network item.
#[must_use]
pub fn regions_or_default(item: &ContentItem) -> Vec<String> {
    debug_assert_eq!(item.kind(), ContentType::Network);
    if item.regions().is_empty() {
        DEFAULT_REGIONS.iter().map(|r| (*r).to_owned()).collect()
    } else {
        item.regions().to_vec()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use noievoi_core::{ContentBody, Page, TeamMember};

    use super::*;

    fn hero(small_text: Option<&str>) -> ContentItem {
        ContentItem::new(
            ContentBody::Hero {
                small_text: small_text.map(str::to_owned),
            },
            "Our Team",
            "/team.jpg",
        )
        .on_page(Page::Team)
    }

    #[test]
    fn test_hero_small_text_fallback() {
        assert_eq!(HeroView::from_item(&hero(None), "TEAM").small_text, "TEAM");
        assert_eq!(HeroView::from_item(&hero(Some("")), "TEAM").small_text, "TEAM");
        assert_eq!(
            HeroView::from_item(&hero(Some("PEOPLE")), "TEAM").small_text,
            "PEOPLE"
        );
    }

    #[test]
    fn test_hero_or_default() {
        let default = HeroView {
            small_text: "TEAM".into(),
            title: "Default".into(),
            description: String::new(),
            image_src: String::new(),
        };
        assert_eq!(HeroView::or_default(None, default.clone()).title, "Default");
        let stored = hero(None);
        let view = HeroView::or_default(Some(&stored), default);
        assert_eq!(view.title, "Our Team");
        assert_eq!(view.small_text, "TEAM");
    }

    #[test]
    fn test_member_card_only_for_team_items() {
        let member = ContentItem::new(
            ContentBody::Team(TeamMember {
                name: "Alex".into(),
                role: "CEO".into(),
                ..TeamMember::default()
            }),
            "Alex",
            "/alex.jpg",
        )
        .with_id("team-1");
        let card = MemberCardView::from_item(&member).unwrap();
        assert_eq!(card.id, "team-1");
        assert_eq!(card.role, "CEO");

        assert!(MemberCardView::from_item(&hero(None)).is_none());
    }

    #[test]
    fn test_default_regions() {
        let empty = ContentItem::new(
            ContentBody::Network {
                regions: Vec::new(),
            },
            "Global",
            "",
        );
        assert_eq!(regions_or_default(&empty), DEFAULT_REGIONS);

        let listed = ContentItem::new(
            ContentBody::Network {
                regions: vec!["Africa".into()],
            },
            "Global",
            "",
        );
        assert_eq!(regions_or_default(&listed), ["Africa"]);
    }
}
