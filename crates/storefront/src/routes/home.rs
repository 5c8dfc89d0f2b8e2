//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::IntoResponse,
};
use campus_market_core::{Carousel, filter::distinct_values};
use tracing::instrument;

use crate::filters;
use crate::layout::Layout;
use crate::routes::QueryParams;
use crate::routes::listing::ProductCard;
use crate::state::AppState;

/// Number of catalog items shown on the home page.
pub const FEATURED_COUNT: usize = 4;

// =============================================================================
// Hero Configuration (Static content for carousel)
// =============================================================================

/// A single slide in the hero carousel.
#[derive(Clone)]
pub struct HeroSlide {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub button_text: &'static str,
    /// Link target relative to the site root.
    pub button_target: &'static str,
    /// CSS modifier picking the slide background.
    pub theme: &'static str,
}

/// The promotional slides, in display order.
pub const HERO_SLIDES: &[HeroSlide] = &[
    HeroSlide {
        title: "毕业季闲置大甩卖",
        subtitle: "教材、台灯、自行车，学长学姐的宝贝等你来淘",
        button_text: "去逛逛",
        button_target: "pages/list.html",
        theme: "sunrise",
    },
    HeroSlide {
        title: "闲置换钱，一键发布",
        subtitle: "拍张照片，写两句描述，同校同学马上看到",
        button_text: "发布商品",
        button_target: "pages/publish.html",
        theme: "ocean",
    },
    HeroSlide {
        title: "当面交易更安心",
        subtitle: "校内见面验货，拒绝先付款后发货",
        button_text: "查看商品",
        button_target: "pages/list.html",
        theme: "forest",
    },
];

/// One indicator dot under the carousel.
pub struct Indicator {
    pub index: usize,
    pub active: bool,
}

/// Rendered carousel state for one page view.
pub struct CarouselView {
    pub slides: Vec<HeroSlide>,
    pub transform: String,
    pub prev: usize,
    pub next: usize,
    pub indicators: Vec<Indicator>,
    /// Seconds until the page advances itself; 0 disables.
    pub refresh_secs: u32,
}

impl CarouselView {
    fn new(slides: &[HeroSlide], requested: i64, refresh_secs: u32) -> Option<Self> {
        let carousel = Carousel::at(slides.len(), requested)?;
        Some(Self {
            slides: slides.to_vec(),
            transform: carousel.transform(),
            prev: carousel.prev_index(),
            next: carousel.next_index(),
            indicators: carousel
                .indicators()
                .into_iter()
                .enumerate()
                .map(|(index, active)| Indicator { index, active })
                .collect(),
            refresh_secs,
        })
    }
}

/// Category shortcut on the home page.
pub struct CategoryLink {
    pub label: String,
    pub href: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub layout: Layout,
    pub carousel: Option<CarouselView>,
    pub featured: Vec<ProductCard>,
    pub categories: Vec<CategoryLink>,
}

/// Query parameters for the home page.
#[derive(Debug, Default)]
pub struct HomeQuery {
    /// Requested slide; anything unparseable shows the first slide.
    pub slide: Option<String>,
}

impl From<&QueryParams> for HomeQuery {
    fn from(params: &QueryParams) -> Self {
        Self {
            slide: params.first("slide").map(ToString::to_string),
        }
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the home page.
#[instrument(skip(state, layout))]
pub async fn home(
    State(state): State<AppState>,
    layout: Layout,
    params: QueryParams,
) -> impl IntoResponse {
    let query = HomeQuery::from(&params);
    let requested = query
        .slide
        .as_deref()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(0);
    let carousel = CarouselView::new(
        HERO_SLIDES,
        requested,
        state.config().carousel_interval_secs,
    );

    let products = state.products().await;
    let featured = products
        .iter()
        .take(FEATURED_COUNT)
        .map(|product| ProductCard::new(product, layout.prefix))
        .collect();
    let categories = distinct_values(&products, |p| p.category.as_str())
        .into_iter()
        .map(|category| CategoryLink {
            label: category.to_string(),
            href: layout.href(&format!(
                "pages/list.html?cat={}",
                urlencoding::encode(category)
            )),
        })
        .collect();

    HomeTemplate {
        layout,
        carousel,
        featured,
        categories,
    }
}
