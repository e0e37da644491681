//! Views: page data → DomNode trees → HTML.

use dishgrid_dom::DomNode;
use dishgrid_render_html::{render_page, render_to_html, PageOptions};

use crate::error::RenderError;
use crate::ordering::Card;

const STYLES: &[&str] = &["/static/style.css"];
const SITE_TITLE: &str = "National dishes";

/// Everything the content fragment needs for one grid layout.
#[derive(Debug, Clone)]
pub struct PageData<'a> {
    pub cards: Vec<Card<'a>>,
    pub columns: usize,
    pub rows: usize,
}

/// Renders the card grid fragment. The cache only sees this seam.
pub trait Presenter: Send + Sync {
    fn render_content(&self, page: &PageData<'_>) -> Result<String, RenderError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlPresenter;

impl Presenter for HtmlPresenter {
    fn render_content(&self, page: &PageData<'_>) -> Result<String, RenderError> {
        content_node(page).map(|node| render_to_html(&node))
    }
}

pub fn content_node(page: &PageData<'_>) -> Result<DomNode, RenderError> {
    if page.columns == 0 {
        return Err(RenderError::NoColumns);
    }

    let grid = DomNode::new("div")
        .with_key(format!("grid-{}", page.columns))
        .with_class("grid")
        .with_attr("data-cols", page.columns.to_string())
        .with_attr("data-rows", page.rows.to_string())
        .with_attr(
            "style",
            format!(
                "grid-template-columns:repeat({},minmax(0,1fr));grid-template-rows:repeat({},auto)",
                page.columns, page.rows
            ),
        )
        .with_children(page.cards.iter().map(card_node));

    Ok(grid)
}

fn card_node(card: &Card<'_>) -> DomNode {
    let record = card.record;

    let mut node = DomNode::new("article")
        .with_key(format!("card-{}", slug(&record.country)))
        .with_class("card")
        .with_attr("data-order", card.order.to_string());
    if let Some(pos) = card.position {
        node = node.with_attr("style", format!("grid-row:{};grid-column:{}", pos.row, pos.col));
    }

    let mut img = DomNode::new("img")
        .with_class("card-img")
        .with_attr("src", card.image_source.as_str())
        .with_attr("alt", record.national_dish.as_str())
        .with_attr("loading", "lazy");
    if record.aspect_ratio > 0.0 {
        img = img.with_attr("style", format!("aspect-ratio:{}", record.aspect_ratio));
    }

    let dish = if record.dish_wiki.is_empty() {
        DomNode::text("span", &record.national_dish)
    } else {
        DomNode::text("a", &record.national_dish)
            .with_attr("href", record.dish_wiki.as_str())
            .with_attr("target", "_blank")
            .with_attr("rel", "noopener")
    };

    node.with_child(img).with_child(
        DomNode::new("div")
            .with_class("card-body")
            .with_child(DomNode::text("h3", &record.country).with_class("card-country"))
            .with_child(dish.with_class("card-dish"))
            .with_child(
                DomNode::text("span", &format!("BMI {:.1}", record.both)).with_class("card-metric"),
            ),
    )
}

fn slug(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

fn nav() -> DomNode {
    DomNode::new("header").with_class("site-header").with_child(
        DomNode::new("nav")
            .with_child(DomNode::text("a", SITE_TITLE).with_attr("href", "/").with_class("brand"))
            .with_child(DomNode::text("a", "Sources").with_attr("href", "/sources")),
    )
}

/// The home page shell. Cards are fetched from `/content` by `grid.js`.
pub fn home_page() -> String {
    let controls = DomNode::new("div")
        .with_class("sort-controls")
        .with_child(
            DomNode::text("button", "Ascending")
                .with_attr("type", "button")
                .with_attr("data-sort", "asc"),
        )
        .with_child(
            DomNode::text("button", "Descending")
                .with_attr("type", "button")
                .with_attr("data-sort", "rev"),
        );

    let body = DomNode::new("div")
        .with_class("page")
        .with_child(nav())
        .with_child(
            DomNode::new("main")
                .with_child(DomNode::text("h1", "A national dish for every country"))
                .with_child(controls)
                .with_child(
                    DomNode::new("section")
                        .with_attr("id", "content")
                        .with_attr("data-endpoint", "/content"),
                ),
        );

    render_page(&PageOptions {
        title: SITE_TITLE.to_string(),
        description: Some("National dishes of the world, arranged as cards.".into()),
        styles: STYLES.iter().map(|s| s.to_string()).collect(),
        scripts: vec!["/static/grid.js".into()],
        body,
    })
}

const SOURCES: &[(&str, &str)] = &[
    (
        "Mean body-mass index by country (NCD Risk Factor Collaboration)",
        "https://ncdrisc.org/data-downloads-adiposity.html",
    ),
    (
        "National dishes (Wikipedia)",
        "https://en.wikipedia.org/wiki/National_dish",
    ),
    (
        "Dish photographs (Wikimedia Commons)",
        "https://commons.wikimedia.org/",
    ),
];

pub fn sources_page() -> String {
    let list = DomNode::new("ul").with_class("sources").with_children(SOURCES.iter().map(
        |(label, href)| {
            DomNode::new("li").with_child(DomNode::text("a", label).with_attr("href", *href))
        },
    ));

    let body = DomNode::new("div").with_class("page").with_child(nav()).with_child(
        DomNode::new("main")
            .with_child(DomNode::text("h1", "Sources"))
            .with_child(list),
    );

    render_page(&PageOptions {
        title: format!("Sources · {}", SITE_TITLE),
        description: None,
        styles: STYLES.iter().map(|s| s.to_string()).collect(),
        scripts: Vec::new(),
        body,
    })
}
