//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use noievoi_core::{ContentType, Page};

use crate::filters;
use crate::routes::sections::{HeroView, SectionView, regions_or_default};
use crate::state::AppState;

/// Eyebrow text when the home hero has none.
const DEFAULT_SMALL_TEXT: &str = "ABOUT US";

/// Network section with the regions to list.
#[derive(Debug, Clone)]
pub struct NetworkView {
    pub title: String,
    pub description: String,
    pub regions: Vec<String>,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Page header; the about item stands in when there is no hero.
    pub hero: Option<HeroView>,
    /// About section, shown only when a separate hero exists.
    pub about: Option<SectionView>,
    pub approach: Option<SectionView>,
    pub network: Option<NetworkView>,
    /// Home items without a dedicated section.
    pub additional: Vec<SectionView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store().read().await;
    let view = store.page_view(Page::Home);

    let hero = view
        .hero()
        .map(|item| HeroView::from_item(item, DEFAULT_SMALL_TEXT));
    let about = view
        .first_of(ContentType::Hero)
        .and(view.first_of(ContentType::About))
        .map(SectionView::from);
    let approach = view.first_of(ContentType::Approach).map(SectionView::from);
    let network = view.first_of(ContentType::Network).map(|item| NetworkView {
        title: item.title.clone(),
        description: item.description.clone(),
        regions: regions_or_default(item),
    });
    let additional = view
        .additional()
        .into_iter()
        .map(SectionView::from)
        .collect();

    HomeTemplate {
        hero,
        about,
        approach,
        network,
        additional,
    }
}
