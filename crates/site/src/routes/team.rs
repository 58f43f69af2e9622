//! Team page and team member detail route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use noievoi_core::{ContentId, ContentType, Page, Project};

use crate::filters;
use crate::routes::sections::{HeroView, MemberCardView, SectionView};
use crate::state::AppState;

const HERO_IMAGE: &str = "https://images.unsplash.com/photo-1522071820081-009f0129c71c?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2070&q=80";

const DEFAULT_CONTACT_TITLE: &str = "Join Our Team";
const DEFAULT_CONTACT_DESCRIPTION: &str = "We're always looking for talented individuals who share our passion for excellence and innovation. If you're interested in joining our team, please reach out with your qualifications and areas of expertise.";
const DEFAULT_CONTACT_EMAIL: &str = "careers@noievoi.com";

fn default_hero() -> HeroView {
    HeroView {
        small_text: "TEAM".to_string(),
        title: "Our Team".to_string(),
        description: "Meet our diverse group of experts with extensive experience across multiple industries.".to_string(),
        image_src: HERO_IMAGE.to_string(),
    }
}

/// Careers call to action at the foot of the team page.
#[derive(Debug, Clone)]
pub struct ContactView {
    pub title: String,
    pub description: String,
    pub mailto: String,
}

/// Team page template.
#[derive(Template, WebTemplate)]
#[template(path = "team.html")]
pub struct TeamTemplate {
    pub hero: HeroView,
    pub members: Vec<MemberCardView>,
    /// Team items without a dedicated section.
    pub additional: Vec<SectionView>,
    pub contact: ContactView,
}

/// Display the team page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store().read().await;
    let view = store.page_view(Page::Team);

    // The team page's own contact item wins over one placed elsewhere.
    let contact_item = view.first_of(ContentType::Contact).or_else(|| {
        noievoi_core::content::first_of_type(store.list_content(), ContentType::Contact)
    });
    let contact = ContactView {
        title: contact_item
            .map(|item| item.title.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTACT_TITLE.to_string()),
        description: contact_item
            .map(|item| item.description.clone())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTACT_DESCRIPTION.to_string()),
        mailto: contact_item
            .and_then(|item| item.contact_email())
            .map_or_else(
                || format!("mailto:{DEFAULT_CONTACT_EMAIL}"),
                noievoi_core::Email::mailto,
            ),
    };

    TeamTemplate {
        hero: HeroView::or_default(view.first_of(ContentType::Hero), default_hero()),
        members: view
            .team_members()
            .into_iter()
            .filter_map(MemberCardView::from_item)
            .collect(),
        additional: view
            .additional()
            .into_iter()
            .map(SectionView::from)
            .collect(),
        contact,
    }
}

/// Team member detail template.
#[derive(Template, WebTemplate)]
#[template(path = "team_detail.html")]
pub struct TeamDetailTemplate {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image_src: String,
    pub projects: Vec<Project>,
}

/// Display one team member.
///
/// Unknown ids, and ids of items that are not team members, redirect to
/// the team page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let store = state.store().read().await;
    let Some((item, member)) = store
        .content_item(&ContentId::new(id))
        .and_then(|item| item.team_member().map(|member| (item, member)))
    else {
        return Redirect::to("/team").into_response();
    };

    TeamDetailTemplate {
        name: member.name.clone(),
        role: member.role.clone(),
        bio: member.bio.clone(),
        image_src: item.image_src.clone(),
        projects: member.projects.clone(),
    }
    .into_response()
}
