//! Product detail page and its comment board.
//!
//! Comments are keyed by the `id` query parameter alone; posting does not
//! require the product to resolve.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use campus_market_core::{Comment, Product, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::find_product;
use crate::db::CommentRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::layout::Layout;
use crate::routes::QueryParams;
use crate::middleware::flash;
use crate::state::AppState;

/// Replaces the detail panel when the id matches nothing.
pub const NOT_FOUND_MESSAGE: &str = "未找到该商品";

// =============================================================================
// View Types
// =============================================================================

/// The fields the detail panel shows.
#[derive(Debug, Clone)]
pub struct ProductDetail {
    pub title: String,
    pub image: String,
    pub price: String,
    pub original_price: Option<String>,
    pub description: String,
    pub category: String,
    pub condition: String,
    pub seller_name: String,
    pub seller_avatar: String,
    pub contact: Option<String>,
    pub published_at: Option<String>,
}

impl From<&Product> for ProductDetail {
    fn from(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            image: product.image.clone(),
            price: product.price.to_string(),
            original_price: product.original_price.as_ref().map(ToString::to_string),
            description: product.description.clone(),
            category: product.category.clone(),
            condition: product.condition.clone(),
            seller_name: product.seller_name.clone(),
            seller_avatar: product.seller_avatar.clone(),
            contact: product.contact.clone(),
            published_at: product
                .create_time
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "detail.html")]
pub struct DetailTemplate {
    pub layout: Layout,
    pub product: Option<ProductDetail>,
    pub not_found_message: &'static str,
    pub comments: Vec<Comment>,
}

/// Query parameters for the detail page.
#[derive(Debug, Default)]
pub struct DetailQuery {
    pub id: Option<String>,
}

impl From<&QueryParams> for DetailQuery {
    fn from(params: &QueryParams) -> Self {
        Self {
            id: params.first("id").map(ToString::to_string),
        }
    }
}

impl DetailQuery {
    fn product_id(&self) -> Option<ProductId> {
        self.id.as_deref().map(ProductId::new)
    }
}

/// Comment form data.
#[derive(Debug, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub content: String,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display one product and its comment thread.
///
/// An unknown or missing id renders the not-found panel with status 404.
#[instrument(skip(state, layout))]
pub async fn show(
    State(state): State<AppState>,
    layout: Layout,
    params: QueryParams,
) -> Result<Response> {
    let query = DetailQuery::from(&params);
    let products = state.products().await;
    let product = query
        .id
        .as_deref()
        .and_then(|id| find_product(&products, id))
        .map(ProductDetail::from);

    let comments = match query.product_id() {
        Some(id) => CommentRepository::new(state.store()).list(&id)?,
        None => Vec::new(),
    };

    let status = if product.is_some() {
        StatusCode::OK
    } else {
        tracing::debug!(id = ?query.id, "Product not found");
        StatusCode::NOT_FOUND
    };

    let template = DetailTemplate {
        layout,
        product,
        not_found_message: NOT_FOUND_MESSAGE,
        comments,
    };

    Ok((status, template).into_response())
}

/// Append a comment to the thread of the product in the query.
#[instrument(skip(state, session, form))]
pub async fn add_comment(
    State(state): State<AppState>,
    session: Session,
    params: QueryParams,
    Form(form): Form<CommentForm>,
) -> Result<Redirect> {
    let query = DetailQuery::from(&params);
    let id = query
        .product_id()
        .ok_or_else(|| AppError::BadRequest("missing product id".to_string()))?;
    let back = format!(
        "/pages/detail.html?id={}",
        urlencoding::encode(id.as_str())
    );

    match Comment::parse(&form.content) {
        Ok(comment) => {
            let count = CommentRepository::new(state.store()).append(&id, comment)?;
            add_breadcrumb("comment", "Comment added", Some(&[("product_id", id.as_str())]));
            tracing::info!(product_id = %id, count, "Comment added");
        }
        Err(e) => flash::push_alert(&session, e.to_string()).await?,
    }

    Ok(Redirect::to(&back))
}
