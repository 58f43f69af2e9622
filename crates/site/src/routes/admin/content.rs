//! Content management route handlers.
//!
//! Content is listed in one tab per content type. The create and edit forms
//! are multipart so an image file can be uploaded alongside the text fields;
//! an uploaded image replaces `imageSrc` with a `data:` URL.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use noievoi_core::{ContentBody, ContentId, ContentItem, ContentType, Email, Page};

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::services::upload::{UploadError, image_data_url};
use crate::state::AppState;

use super::{AdminUserView, MessageQuery, redirect_error, redirect_success};

// =============================================================================
// Query Types
// =============================================================================

/// Selected content type tab.
#[derive(Debug, Deserialize)]
pub struct TypeQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl TypeQuery {
    /// The requested type; `about` when absent or unknown.
    fn kind(&self) -> ContentType {
        self.kind
            .as_deref()
            .and_then(|k| k.parse().ok())
            .unwrap_or(ContentType::About)
    }
}

fn list_path(kind: ContentType) -> String {
    format!("/admin/content?type={kind}")
}

// =============================================================================
// Views
// =============================================================================

/// One tab of the content list.
#[derive(Debug, Clone)]
pub struct TabView {
    pub kind: String,
    pub label: String,
    pub count: usize,
    pub active: bool,
}

/// One row of the content list.
#[derive(Debug, Clone)]
pub struct ContentRow {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub image_src: String,
    pub page: String,
}

impl From<&ContentItem> for ContentRow {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            summary: item.summary().to_owned(),
            image_src: item.image_src.clone(),
            page: item.resolved_page().to_string(),
        }
    }
}

/// An option of a `<select>`.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

const fn page_label(page: Page) -> &'static str {
    match page {
        Page::Home => "Home",
        Page::Services => "Services",
        Page::Team => "Team",
        Page::Global => "Global",
    }
}

fn page_options(selected: Option<Page>) -> Vec<OptionView> {
    let automatic = OptionView {
        value: String::new(),
        label: "Automatic".to_string(),
        selected: selected.is_none(),
    };
    std::iter::once(automatic)
        .chain(Page::ALL.into_iter().map(|page| OptionView {
            value: page.as_str().to_string(),
            label: page_label(page).to_string(),
            selected: selected == Some(page),
        }))
        .collect()
}

/// Content list page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/content.html")]
pub struct ContentListTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub tabs: Vec<TabView>,
    pub kind: String,
    pub kind_label: String,
    pub items: Vec<ContentRow>,
    pub success: Option<String>,
    pub error: Option<String>,
}

/// Create/edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/content_form.html")]
pub struct ContentFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub is_new: bool,
    pub action: String,
    pub kind: String,
    pub kind_label: String,
    pub title: String,
    pub description: String,
    pub image_src: String,
    pub pages: Vec<OptionView>,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub small_text: String,
    pub email: String,
    pub regions: String,
    pub step_count: usize,
    pub project_count: usize,
    pub success: Option<String>,
    pub error: Option<String>,
}

impl ContentFormTemplate {
    fn new(
        admin: AdminUserView,
        item: &ContentItem,
        action: String,
        messages: &MessageQuery,
    ) -> Self {
        let member = item.team_member();
        let is_new = item.id.is_empty();
        Self {
            admin_user: admin,
            current_path: "/admin/content".to_string(),
            is_new,
            action,
            kind: item.kind().as_str().to_string(),
            kind_label: item.kind().label().to_string(),
            title: item.title.clone(),
            description: item.description.clone(),
            image_src: item.image_src.clone(),
            pages: page_options(item.page),
            name: member.map(|m| m.name.clone()).unwrap_or_default(),
            role: member.map(|m| m.role.clone()).unwrap_or_default(),
            bio: member.map(|m| m.bio.clone()).unwrap_or_default(),
            small_text: item.small_text().unwrap_or_default().to_string(),
            email: item.contact_email().map(ToString::to_string).unwrap_or_default(),
            regions: item.regions().join("\n"),
            step_count: item.steps().len(),
            project_count: member.map_or(0, |m| m.projects.len()),
            success: messages.success_message(),
            error: messages.error_message(),
        }
    }
}

impl ContentFormTemplate {
    /// The form shown again after `error`, holding what was submitted.
    fn rejected(
        admin: AdminUserView,
        item: &ContentItem,
        action: String,
        form: &ContentForm,
        error: &FormError,
    ) -> Self {
        let messages = MessageQuery {
            success: None,
            error: Some(error.code().to_string()),
        };
        let mut template = Self::new(admin, item, action, &messages);
        if matches!(error, FormError::InvalidEmail) {
            template.email = form.text("email").to_owned();
        }
        template
    }
}

fn edit_path(id: &str) -> String {
    format!("/admin/content/{}/edit", urlencoding::encode(id))
}

fn item_path(id: &str) -> String {
    format!("/admin/content/{}", urlencoding::encode(id))
}

// =============================================================================
// Form Handling
// =============================================================================

/// Reasons a submitted content form is rejected.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("multipart body could not be read")]
    Unreadable,

    #[error("title and image are required")]
    Required,

    #[error("invalid contact email")]
    InvalidEmail,

    #[error(transparent)]
    Upload(#[from] UploadError),
}

impl FormError {
    /// Notice code for the redirect.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unreadable => "upload",
            Self::Required => "required",
            Self::InvalidEmail => "email",
            Self::Upload(UploadError::NotAnImage) => "not_image",
            Self::Upload(UploadError::TooLarge) => "too_large",
        }
    }
}

/// An image file from the form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub content_type: String,
    pub bytes: Bytes,
}

/// A submitted content form: text fields by name plus an optional image.
#[derive(Debug, Default)]
pub struct ContentForm {
    pub fields: HashMap<String, String>,
    pub image: Option<UploadedImage>,
}

impl ContentForm {
    /// Read every field of a multipart body.
    ///
    /// A file input left empty is not an upload.
    ///
    /// # Errors
    ///
    /// Returns `FormError::Unreadable` if the body is malformed or exceeds
    /// the body limit.
    pub async fn read(mut multipart: Multipart) -> std::result::Result<Self, FormError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(|e| {
            tracing::warn!(error = %e, "unreadable content form");
            FormError::Unreadable
        })? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            if name == "image" {
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let has_file = field.file_name().is_some_and(|f| !f.is_empty());
                let bytes = field.bytes().await.map_err(|e| {
                    tracing::warn!(error = %e, "unreadable image upload");
                    FormError::Unreadable
                })?;
                if has_file && !bytes.is_empty() {
                    form.image = Some(UploadedImage {
                        content_type,
                        bytes,
                    });
                }
            } else {
                let value = field.text().await.map_err(|_| FormError::Unreadable)?;
                form.fields.insert(name, value);
            }
        }
        Ok(form)
    }

    fn text(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", |v| v.trim())
    }

    /// The `type` field, if it names a content type.
    #[must_use]
    pub fn kind(&self) -> Option<ContentType> {
        self.text("type").parse().ok()
    }

    /// Overlay the submitted fields onto `item`, then check the required
    /// ones.
    ///
    /// Fields the form does not carry (approach steps, team projects) are
    /// left as they are. On error `item` keeps every field applied so far,
    /// so the form can be shown again with the input. The image is replaced by an upload when present,
    /// else by a non-empty `image_url`, else kept.
    ///
    /// # Errors
    ///
    /// Returns a `FormError` for a rejected upload, an invalid contact
    /// email, or a missing title or image.
    pub fn apply_to(&self, item: &mut ContentItem) -> std::result::Result<(), FormError> {
        item.title = self.text("title").to_owned();
        item.description = self.text("description").to_owned();
        item.page = self.text("page").parse().ok();

        match &mut item.body {
            ContentBody::Team(member) => {
                member.name = self.text("name").to_owned();
                member.role = self.text("role").to_owned();
                member.bio = self.text("bio").to_owned();
            }
            ContentBody::Hero { small_text } => {
                let text = self.text("small_text");
                *small_text = (!text.is_empty()).then(|| text.to_owned());
            }
            ContentBody::Contact { email } => {
                let raw = self.text("email");
                *email = if raw.is_empty() {
                    None
                } else {
                    Some(Email::parse(raw).map_err(|_| FormError::InvalidEmail)?)
                };
            }
            ContentBody::Network { regions } => {
                *regions = self
                    .text("regions")
                    .split(['\n', ','])
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .map(str::to_owned)
                    .collect();
            }
            ContentBody::About | ContentBody::Service | ContentBody::Approach { .. } => {}
        }

        if let Some(image) = &self.image {
            item.image_src = image_data_url(&image.content_type, &image.bytes)?;
        } else if !self.text("image_url").is_empty() {
            item.image_src = self.text("image_url").to_owned();
        }

        if item.title.is_empty() || item.image_src.is_empty() {
            return Err(FormError::Required);
        }
        Ok(())
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Content list, one tab per type.
#[instrument(skip(admin, state))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(tab): Query<TypeQuery>,
    Query(messages): Query<MessageQuery>,
) -> impl IntoResponse {
    let kind = tab.kind();
    let store = state.store().read().await;
    let content = store.list_content();

    let tabs = ContentType::ALL
        .into_iter()
        .map(|k| TabView {
            kind: k.as_str().to_string(),
            label: k.label().to_string(),
            count: content.iter().filter(|item| item.kind() == k).count(),
            active: k == kind,
        })
        .collect();
    let items = content
        .iter()
        .filter(|item| item.kind() == kind)
        .map(ContentRow::from)
        .collect();

    ContentListTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/admin/content".to_string(),
        tabs,
        kind: kind.as_str().to_string(),
        kind_label: kind.label().to_string(),
        items,
        success: messages.success_message(),
        error: messages.error_message(),
    }
}

/// Empty form for a new item of the selected type.
#[instrument(skip(admin))]
pub async fn new_page(
    RequireAdminAuth(admin): RequireAdminAuth,
    Query(tab): Query<TypeQuery>,
    Query(messages): Query<MessageQuery>,
) -> impl IntoResponse {
    let kind = tab.kind();
    let item = ContentItem::new(ContentBody::empty(kind), "", "").on_page(kind.legacy_page());
    ContentFormTemplate::new(
        AdminUserView::from(&admin),
        &item,
        "/admin/content".to_string(),
        &messages,
    )
}

/// Edit form for an existing item.
#[instrument(skip(admin, state))]
pub async fn edit_page(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(messages): Query<MessageQuery>,
) -> Response {
    let store = state.store().read().await;
    let Some(item) = store.content_item(&ContentId::new(id.as_str())) else {
        return redirect_error("/admin/content", "not_found").into_response();
    };
    ContentFormTemplate::new(AdminUserView::from(&admin), item, item_path(&id), &messages)
        .into_response()
}

/// Create an item from the submitted form.
///
/// A rejected form is shown again with the submitted values.
///
/// # Errors
///
/// Returns an error if the content cannot be persisted.
#[instrument(skip(admin, state, multipart))]
pub async fn create(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response> {
    let form = match ContentForm::read(multipart).await {
        Ok(form) => form,
        Err(e) => return Ok(redirect_error("/admin/content/new", e.code()).into_response()),
    };
    let kind = form.kind().unwrap_or(ContentType::About);

    let mut item = ContentItem::new(ContentBody::empty(kind), "", "");
    if let Err(e) = form.apply_to(&mut item) {
        tracing::debug!(error = %e, "content form rejected");
        return Ok(ContentFormTemplate::rejected(
            AdminUserView::from(&admin),
            &item,
            "/admin/content".to_string(),
            &form,
            &e,
        )
        .into_response());
    }

    state.store().write().await.add_content(item)?;
    Ok(redirect_success(&list_path(kind), "created").into_response())
}

/// Apply the submitted form to an existing item.
///
/// A rejected form is shown again with the submitted values.
///
/// # Errors
///
/// Returns an error if the content cannot be persisted.
#[instrument(skip(admin, state, multipart))]
pub async fn update(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Response> {
    let form = match ContentForm::read(multipart).await {
        Ok(form) => form,
        Err(e) => return Ok(redirect_error(&edit_path(&id), e.code()).into_response()),
    };

    let mut store = state.store().write().await;
    let Some(mut item) = store.content_item(&ContentId::new(id.as_str())).cloned() else {
        return Ok(redirect_error("/admin/content", "not_found").into_response());
    };
    if let Err(e) = form.apply_to(&mut item) {
        tracing::debug!(error = %e, "content form rejected");
        return Ok(ContentFormTemplate::rejected(
            AdminUserView::from(&admin),
            &item,
            item_path(&id),
            &form,
            &e,
        )
        .into_response());
    }

    let kind = item.kind();
    store.update_content(item)?;
    Ok(redirect_success(&list_path(kind), "updated").into_response())
}

/// Delete an item.
///
/// # Errors
///
/// Returns an error if the content cannot be persisted.
#[instrument(skip(_admin, state))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = ContentId::new(id);
    let mut store = state.store().write().await;
    let kind = store
        .content_item(&id)
        .map_or(ContentType::About, ContentItem::kind);
    store.delete_content(&id)?;
    Ok(redirect_success(&list_path(kind), "deleted"))
}
