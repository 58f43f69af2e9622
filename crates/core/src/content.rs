//! Page content records and the derived per-page views.
//!
//! A [`ContentItem`] is one editable unit of page content. Its
//! [`ContentBody`] is a variant per content type carrying only the fields
//! that type uses, so a hero can never hold team projects and a team
//! member can never hold network regions.
//!
//! The stored JSON shape is flat: the variant is selected by the `type`
//! field and its fields sit beside the shared ones.
//!
//! ```json
//! { "id": "team-1", "type": "team", "title": "Alex Morgan",
//!   "imageSrc": "...", "page": "team", "name": "Alex Morgan",
//!   "role": "CEO & Founder", "bio": "...", "projects": [] }
//! ```

use serde::{Deserialize, Serialize};

use crate::types::{ContentId, ContentType, Email, Page, ProjectId, StepId};

/// One step of an approach section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A project shown on a team member's detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_src: String,
}

/// Fields specific to a team member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Type-specific part of a content item, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ContentBody {
    About,
    Service,
    Team(TeamMember),
    Approach {
        #[serde(default)]
        steps: Vec<Step>,
    },
    Contact {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<Email>,
    },
    Network {
        #[serde(default)]
        regions: Vec<String>,
    },
    Hero {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        small_text: Option<String>,
    },
}

impl ContentBody {
    /// An empty body for the given content type.
    #[must_use]
    pub fn empty(kind: ContentType) -> Self {
        match kind {
            ContentType::About => Self::About,
            ContentType::Service => Self::Service,
            ContentType::Team => Self::Team(TeamMember::default()),
            ContentType::Approach => Self::Approach { steps: Vec::new() },
            ContentType::Contact => Self::Contact { email: None },
            ContentType::Network => Self::Network {
                regions: Vec::new(),
            },
            ContentType::Hero => Self::Hero { small_text: None },
        }
    }

    /// The content type this body represents.
    #[must_use]
    pub const fn kind(&self) -> ContentType {
        match self {
            Self::About => ContentType::About,
            Self::Service => ContentType::Service,
            Self::Team(_) => ContentType::Team,
            Self::Approach { .. } => ContentType::Approach,
            Self::Contact { .. } => ContentType::Contact,
            Self::Network { .. } => ContentType::Network,
            Self::Hero { .. } => ContentType::Hero,
        }
    }
}

/// One editable unit of page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Unique id; empty until the store assigns one.
    #[serde(default)]
    pub id: ContentId,
    #[serde(flatten)]
    pub body: ContentBody,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_src: String,
    /// Explicit page; `None` for records predating pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
}

impl ContentItem {
    /// Create an item without an id.
    #[must_use]
    pub fn new(body: ContentBody, title: impl Into<String>, image_src: impl Into<String>) -> Self {
        Self {
            id: ContentId::default(),
            body,
            title: title.into(),
            description: String::new(),
            image_src: image_src.into(),
            page: None,
        }
    }

    /// Set the id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ContentId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach the item to a page.
    #[must_use]
    pub const fn on_page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    /// The item's content type.
    #[must_use]
    pub const fn kind(&self) -> ContentType {
        self.body.kind()
    }

    /// The page the item renders on, applying the legacy fallback when no
    /// page is stored.
    #[must_use]
    pub fn resolved_page(&self) -> Page {
        self.page.unwrap_or_else(|| self.kind().legacy_page())
    }

    /// Team member fields, if this is a team item.
    #[must_use]
    pub const fn team_member(&self) -> Option<&TeamMember> {
        match &self.body {
            ContentBody::Team(member) => Some(member),
            _ => None,
        }
    }

    /// Approach steps; empty for other types.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        match &self.body {
            ContentBody::Approach { steps } => steps,
            _ => &[],
        }
    }

    /// Network regions; empty for other types.
    #[must_use]
    pub fn regions(&self) -> &[String] {
        match &self.body {
            ContentBody::Network { regions } => regions,
            _ => &[],
        }
    }

    /// Hero eyebrow text.
    #[must_use]
    pub fn small_text(&self) -> Option<&str> {
        match &self.body {
            ContentBody::Hero { small_text } => small_text.as_deref(),
            _ => None,
        }
    }

    /// Contact address.
    #[must_use]
    pub const fn contact_email(&self) -> Option<&Email> {
        match &self.body {
            ContentBody::Contact { email } => email.as_ref(),
            _ => None,
        }
    }

    /// Second line shown in admin listings: a team member's role, otherwise
    /// the description.
    #[must_use]
    pub fn summary(&self) -> &str {
        match &self.body {
            ContentBody::Team(member) if !member.role.is_empty() => &member.role,
            _ => &self.description,
        }
    }
}

/// Items that render on `page`, in collection order.
pub fn filter_by_page(items: &[ContentItem], page: Page) -> impl Iterator<Item = &ContentItem> {
    items.iter().filter(move |item| item.resolved_page() == page)
}

/// First item of `kind` anywhere in the collection.
#[must_use]
pub fn first_of_type(items: &[ContentItem], kind: ContentType) -> Option<&ContentItem> {
    items.iter().find(|item| item.kind() == kind)
}

/// The content of one page, with lookups for its sections.
///
/// Built on demand from the full collection; nothing here is stored.
#[derive(Debug, Clone)]
pub struct PageView<'a> {
    page: Page,
    items: Vec<&'a ContentItem>,
}

impl<'a> PageView<'a> {
    /// Select the items of `page` from the full collection.
    #[must_use]
    pub fn new(items: &'a [ContentItem], page: Page) -> Self {
        Self {
            page,
            items: filter_by_page(items, page).collect(),
        }
    }

    /// The page this view covers.
    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    /// All items on the page.
    #[must_use]
    pub fn items(&self) -> &[&'a ContentItem] {
        &self.items
    }

    /// First item of `kind` on the page.
    #[must_use]
    pub fn first_of(&self, kind: ContentType) -> Option<&'a ContentItem> {
        self.items.iter().copied().find(|item| item.kind() == kind)
    }

    /// Every item of `kind` on the page.
    #[must_use]
    pub fn all_of(&self, kind: ContentType) -> Vec<&'a ContentItem> {
        self.items
            .iter()
            .copied()
            .filter(|item| item.kind() == kind)
            .collect()
    }

    /// The page's hero item, falling back to its about item.
    #[must_use]
    pub fn hero(&self) -> Option<&'a ContentItem> {
        self.first_of(ContentType::Hero)
            .or_else(|| self.first_of(ContentType::About))
    }

    /// Team items that carry a member name.
    #[must_use]
    pub fn team_members(&self) -> Vec<&'a ContentItem> {
        self.items
            .iter()
            .copied()
            .filter(|item| item.team_member().is_some_and(|m| !m.name.is_empty()))
            .collect()
    }

    /// Split the page into items with a dedicated section and the rest.
    #[must_use]
    pub fn partition(&self) -> (Vec<&'a ContentItem>, Vec<&'a ContentItem>) {
        let named = self.page.named_sections();
        self.items
            .iter()
            .copied()
            .partition(|item| named.contains(&item.kind()))
    }

    /// Items without a dedicated section; rendered generically.
    #[must_use]
    pub fn additional(&self) -> Vec<&'a ContentItem> {
        self.partition().1
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn item(id: &str, body: ContentBody, page: Option<Page>) -> ContentItem {
        let mut item = ContentItem::new(body, id.to_uppercase(), format!("/img/{id}.jpg"))
            .with_id(id);
        item.page = page;
        item
    }

    fn sample() -> Vec<ContentItem> {
        vec![
            item("about", ContentBody::About, Some(Page::Home)),
            item("service-1", ContentBody::Service, None),
            item("legacy-about", ContentBody::About, None),
            item(
                "team-1",
                ContentBody::Team(TeamMember {
                    name: "Alex".into(),
                    ..TeamMember::default()
                }),
                Some(Page::Team),
            ),
            item("team-2", ContentBody::empty(ContentType::Team), Some(Page::Team)),
            item("contact", ContentBody::empty(ContentType::Contact), None),
            item("services-hero", ContentBody::empty(ContentType::Hero), Some(Page::Services)),
            item("extra", ContentBody::About, Some(Page::Services)),
        ]
    }

    #[test]
    fn test_parses_flat_stored_shape() {
        let json = r#"{
            "id": "team-1", "type": "team", "title": "Alex Morgan",
            "imageSrc": "a.jpg", "page": "team", "name": "Alex Morgan",
            "role": "CEO", "bio": "Bio",
            "projects": [{"id": "project-1", "title": "P", "description": "D", "imageSrc": "p.jpg"}]
        }"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind(), ContentType::Team);
        assert_eq!(item.description, "");
        let member = item.team_member().unwrap();
        assert_eq!(member.role, "CEO");
        assert_eq!(member.projects[0].image_src, "p.jpg");
    }

    #[test]
    fn test_serializes_flat_with_type_tag() {
        let hero = item(
            "home-hero",
            ContentBody::Hero {
                small_text: Some("ABOUT US".into()),
            },
            Some(Page::Home),
        );
        let value = serde_json::to_value(&hero).unwrap();
        assert_eq!(value["type"], "hero");
        assert_eq!(value["smallText"], "ABOUT US");
        assert_eq!(value["imageSrc"], "/img/home-hero.jpg");
        assert_eq!(value["page"], "home");
    }

    #[test]
    fn test_legacy_item_without_page_parses() {
        let json = r#"{"id": "network", "type": "network", "title": "Our Network",
                       "description": "d", "imageSrc": "n.jpg", "regions": ["Europe"]}"#;
        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.page, None);
        assert_eq!(item.resolved_page(), Page::Home);
        assert_eq!(item.regions(), ["Europe".to_string()]);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = r#"{"id": "x", "type": "blog", "title": "t", "imageSrc": "i"}"#;
        assert!(serde_json::from_str::<ContentItem>(json).is_err());
    }

    #[test]
    fn test_filter_by_page_uses_fallback() {
        let items = sample();
        let home: Vec<_> = filter_by_page(&items, Page::Home).map(|i| i.id.as_str()).collect();
        assert_eq!(home, ["about", "legacy-about"]);

        let services: Vec<_> = filter_by_page(&items, Page::Services)
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(services, ["service-1", "services-hero", "extra"]);

        let global: Vec<_> = filter_by_page(&items, Page::Global)
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(global, ["contact"]);
    }

    #[test]
    fn test_every_item_lands_on_exactly_one_page() {
        let items = sample();
        for it in &items {
            let hits = Page::ALL
                .into_iter()
                .filter(|page| filter_by_page(&items, *page).any(|i| i.id == it.id))
                .count();
            assert_eq!(hits, 1, "{} matched {hits} pages", it.id);
        }
    }

    #[test]
    fn test_hero_prefers_hero_then_about() {
        let items = sample();
        let services = PageView::new(&items, Page::Services);
        assert_eq!(services.hero().unwrap().id.as_str(), "services-hero");

        let home = PageView::new(&items, Page::Home);
        assert_eq!(home.hero().unwrap().id.as_str(), "about");

        let team = PageView::new(&items, Page::Team);
        assert!(team.hero().is_none());
    }

    #[test]
    fn test_partition_separates_generic_sections() {
        let items = sample();
        let services = PageView::new(&items, Page::Services);
        let (named, additional) = services.partition();
        assert_eq!(named.len(), 2);
        assert_eq!(additional.len(), 1);
        assert_eq!(additional[0].id.as_str(), "extra");
    }

    #[test]
    fn test_team_members_require_a_name() {
        let items = sample();
        let team = PageView::new(&items, Page::Team);
        let members: Vec<_> = team.team_members().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(members, ["team-1"]);
        assert_eq!(team.all_of(ContentType::Team).len(), 2);
    }

    #[test]
    fn test_contact_found_outside_team_page() {
        let items = sample();
        let team = PageView::new(&items, Page::Team);
        assert!(team.first_of(ContentType::Contact).is_none());
        assert_eq!(
            first_of_type(&items, ContentType::Contact).unwrap().id.as_str(),
            "contact"
        );
    }

    #[test]
    fn test_summary_prefers_team_role() {
        let mut member = item(
            "team-9",
            ContentBody::Team(TeamMember {
                role: "Advisor".into(),
                ..TeamMember::default()
            }),
            None,
        );
        member.description = "ignored".into();
        assert_eq!(member.summary(), "Advisor");

        let service = item("s", ContentBody::Service, None).with_description("Consulting");
        assert_eq!(service.summary(), "Consulting");
    }
}
