//! Services page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use noievoi_core::{ContentType, Page};

use crate::filters;
use crate::routes::sections::{CardView, HeroView, SectionView, StepView};
use crate::state::AppState;

const HERO_IMAGE: &str = "https://images.unsplash.com/photo-1661956602868-6ae368943878?ixlib=rb-4.0.3&ixid=M3wxMjA3fDF8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2070&q=80";

fn default_hero() -> HeroView {
    HeroView {
        small_text: "SERVICES".to_string(),
        title: "Our Services".to_string(),
        description: "Tailored solutions to meet your business needs across various industries and challenges.".to_string(),
        image_src: HERO_IMAGE.to_string(),
    }
}

/// The fixed engagement process shown below the service list.
fn process_steps() -> Vec<StepView> {
    vec![
        StepView::new(
            "Initial Consultation",
            "We begin with a thorough consultation to understand your business, challenges, and objectives. This forms the foundation of our working relationship.",
        ),
        StepView::new(
            "Strategic Assessment",
            "Our team analyzes your situation, identifies key areas for improvement, and develops a customized strategy to address your specific needs.",
        ),
        StepView::new(
            "Implementation & Execution",
            "We work collaboratively with your team to implement the agreed-upon solutions, providing guidance and expertise throughout the process.",
        ),
        StepView::new(
            "Evaluation & Refinement",
            "We continuously monitor progress, measure results against key performance indicators, and refine our approach to ensure optimal outcomes.",
        ),
    ]
}

/// Services page template.
#[derive(Template, WebTemplate)]
#[template(path = "services.html")]
pub struct ServicesTemplate {
    pub hero: HeroView,
    pub services: Vec<CardView>,
    /// Services items without a dedicated section.
    pub additional: Vec<SectionView>,
    pub process: Vec<StepView>,
}

/// Display the services page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let store = state.store().read().await;
    let view = store.page_view(Page::Services);

    ServicesTemplate {
        hero: HeroView::or_default(view.first_of(ContentType::Hero), default_hero()),
        services: view
            .all_of(ContentType::Service)
            .into_iter()
            .map(CardView::from)
            .collect(),
        additional: view
            .additional()
            .into_iter()
            .map(SectionView::from)
            .collect(),
        process: process_steps(),
    }
}
