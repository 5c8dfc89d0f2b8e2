//! Publish form route handlers.
//!
//! Both the form and its submission sit behind [`RequireUser`]. A rejected
//! submission re-renders the form with the entered values and an alert; the
//! already-encoded image rides along in a hidden field so it need not be
//! chosen again.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use campus_market_core::{CONDITION_OPTIONS, ImageData, PublishDraft};
use chrono::Utc;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::ListingRepository;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::layout::Layout;
use crate::middleware::{RequireUser, flash};
use crate::routes::listing::FilterOption;
use crate::state::AppState;

/// Alert shown after a successful publish.
pub const PUBLISHED_MESSAGE: &str = "发布成功！";

/// Where a successful publish lands.
const HOME_PATH: &str = "/index.html";

// =============================================================================
// Templates
// =============================================================================

/// Publish form template.
#[derive(Template, WebTemplate)]
#[template(path = "publish.html")]
pub struct PublishTemplate {
    pub layout: Layout,
    pub title: String,
    pub price: String,
    pub contact: String,
    pub description: String,
    pub conditions: Vec<FilterOption>,
    /// Previously uploaded image as a data URL, empty if none.
    pub image_data: String,
}

impl PublishTemplate {
    fn new(layout: Layout, draft: &PublishDraft) -> Self {
        Self {
            layout,
            title: draft.title.clone(),
            price: draft.price.clone(),
            contact: draft.contact.clone(),
            description: draft.description.clone(),
            conditions: CONDITION_OPTIONS
                .iter()
                .map(|value| FilterOption {
                    value: (*value).to_string(),
                    selected: *value == draft.condition,
                })
                .collect(),
            image_data: draft
                .image
                .as_ref()
                .map(|image| image.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the empty publish form.
pub async fn form(RequireUser(_user): RequireUser, layout: Layout) -> impl IntoResponse {
    PublishTemplate::new(layout, &PublishDraft::default())
}

/// Validate the submitted form and prepend the new listing.
#[instrument(skip_all, fields(user = %user.name))]
pub async fn submit(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    session: Session,
    layout: Layout,
    multipart: Multipart,
) -> Result<Response> {
    let draft = read_draft(multipart).await?;

    match draft.clone().into_product(Utc::now()) {
        Ok(product) => {
            let id = product.id.clone();
            ListingRepository::new(state.store()).publish(product)?;
            add_breadcrumb("publish", "Listing published", Some(&[("product_id", id.as_str())]));
            tracing::info!(product_id = %id, "Listing published");

            flash::push_alert(&session, PUBLISHED_MESSAGE).await?;
            Ok(Redirect::to(HOME_PATH).into_response())
        }
        Err(e) => {
            tracing::debug!(reason = %e, "Publish rejected");
            let template = PublishTemplate::new(layout.with_alert(e.to_string()), &draft);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response())
        }
    }
}

/// Collect the form fields into a draft.
///
/// A fresh upload wins over an image carried back from an earlier attempt.
async fn read_draft(mut multipart: Multipart) -> Result<PublishDraft> {
    let mut draft = PublishDraft::default();
    let mut uploaded = None;
    let mut carried = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "image" => {
                let content_type = field.content_type().unwrap_or_default().to_owned();
                let bytes = field.bytes().await?;
                uploaded = ImageData::encode(&content_type, &bytes);
            }
            "image_data" => carried = ImageData::from_data_url(&field.text().await?),
            "title" => draft.title = field.text().await?,
            "price" => draft.price = field.text().await?,
            "contact" => draft.contact = field.text().await?,
            "description" => draft.description = field.text().await?,
            "condition" => draft.condition = field.text().await?,
            _ => {}
        }
    }

    draft.image = uploaded.or(carried);
    Ok(draft)
}
