//! Product list page and the product card shared with the home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::IntoResponse,
};
use campus_market_core::filter::{ALL, distinct_values};
use campus_market_core::{ListingFilter, Product};
use tracing::instrument;

use crate::filters;
use crate::layout::Layout;
use crate::routes::QueryParams;
use crate::state::AppState;

/// Shown instead of the grid when nothing matches.
pub const EMPTY_LIST_MESSAGE: &str = "暂无符合条件的商品";

// =============================================================================
// View Types
// =============================================================================

/// Display data for one product card.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub href: String,
    pub title: String,
    pub image: String,
    pub category: String,
    pub price: String,
    pub original_price: Option<String>,
    pub seller_name: String,
    pub seller_avatar: String,
    pub condition: String,
}

impl ProductCard {
    /// Card for `product` on a page whose root prefix is `prefix`.
    #[must_use]
    pub fn new(product: &Product, prefix: &str) -> Self {
        Self {
            href: format!(
                "{prefix}pages/detail.html?id={}",
                urlencoding::encode(product.id.as_str())
            ),
            title: product.title.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            original_price: product.original_price.as_ref().map(ToString::to_string),
            seller_name: product.seller_name.clone(),
            seller_avatar: product.seller_avatar.clone(),
            condition: product.condition.clone(),
        }
    }
}

/// One `<option>` of a filter select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub selected: bool,
}

/// Options for a select: every known value, plus `selected` if unknown.
fn filter_options(values: &[&str], selected: &str) -> Vec<FilterOption> {
    let mut options: Vec<FilterOption> = values
        .iter()
        .map(|value| FilterOption {
            value: (*value).to_string(),
            selected: *value == selected,
        })
        .collect();

    if selected != ALL && !values.contains(&selected) {
        options.push(FilterOption {
            value: selected.to_string(),
            selected: true,
        });
    }

    options
}

// =============================================================================
// Templates
// =============================================================================

/// Product list page template.
#[derive(Template, WebTemplate)]
#[template(path = "list.html")]
pub struct ListTemplate {
    pub layout: Layout,
    pub cards: Vec<ProductCard>,
    pub categories: Vec<FilterOption>,
    pub conditions: Vec<FilterOption>,
    pub all_categories: bool,
    pub all_conditions: bool,
    pub empty_message: &'static str,
}

/// Query parameters for the list page.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub cat: Option<String>,
    pub cond: Option<String>,
}

impl From<&QueryParams> for ListQuery {
    fn from(params: &QueryParams) -> Self {
        Self {
            cat: params.first("cat").map(ToString::to_string),
            cond: params.first("cond").map(ToString::to_string),
        }
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the filterable product list.
#[instrument(skip(state, layout))]
pub async fn list(
    State(state): State<AppState>,
    layout: Layout,
    params: QueryParams,
) -> impl IntoResponse {
    let query = ListQuery::from(&params);
    let products = state.products().await;
    let filter = ListingFilter::from_params(query.cat.as_deref(), query.cond.as_deref());

    let cards: Vec<ProductCard> = filter
        .apply(&products)
        .into_iter()
        .map(|product| ProductCard::new(product, layout.prefix))
        .collect();
    tracing::debug!(shown = cards.len(), total = products.len(), "Filtered list");

    let categories = filter_options(
        &distinct_values(&products, |p| p.category.as_str()),
        filter.category.as_param(),
    );
    let conditions = filter_options(
        &distinct_values(&products, |p| p.condition.as_str()),
        filter.condition.as_param(),
    );

    ListTemplate {
        layout,
        cards,
        categories,
        conditions,
        all_categories: filter.category.as_param() == ALL,
        all_conditions: filter.condition.as_param() == ALL,
        empty_message: EMPTY_LIST_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_market_core::{Price, ProductId};

    #[test]
    fn test_card_links_to_detail() {
        let product = Product {
            id: ProductId::new("u_1700000000000"),
            title: "台灯".to_string(),
            price: Price::new("20"),
            original_price: None,
            description: String::new(),
            category: "用户发布".to_string(),
            condition: "九成新".to_string(),
            seller_name: "我发布的".to_string(),
            seller_avatar: String::new(),
            image: String::new(),
            contact: None,
            create_time: None,
        };

        let card = ProductCard::new(&product, "../");
        assert_eq!(card.href, "../pages/detail.html?id=u_1700000000000");
        assert_eq!(card.price, "20");
        assert!(card.original_price.is_none());
    }

    #[test]
    fn test_card_encodes_id() {
        let mut product = Product {
            id: ProductId::new("a b&c"),
            title: String::new(),
            price: Price::new("1"),
            original_price: Some(Price::new("2")),
            description: String::new(),
            category: String::new(),
            condition: String::new(),
            seller_name: String::new(),
            seller_avatar: String::new(),
            image: String::new(),
            contact: None,
            create_time: None,
        };
        let card = ProductCard::new(&product, "./");
        assert_eq!(card.href, "./pages/detail.html?id=a%20b%26c");
        assert_eq!(card.original_price.as_deref(), Some("2"));

        product.id = ProductId::new("7");
        assert_eq!(ProductCard::new(&product, "./").href, "./pages/detail.html?id=7");
    }

    #[test]
    fn test_filter_options_keep_unknown_selection() {
        let options = filter_options(&["electronics", "books"], "books");
        assert_eq!(options.len(), 2);
        assert!(options[1].selected);

        let options = filter_options(&["electronics"], "furniture");
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].value, "furniture");
        assert!(options[1].selected);

        let options = filter_options(&["electronics"], "all");
        assert_eq!(options.len(), 1);
        assert!(!options[0].selected);
    }
}
