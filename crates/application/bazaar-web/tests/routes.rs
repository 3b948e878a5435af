//! Router tests driven in-process with `oneshot`

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use bazaar_catalog::Catalog;
use bazaar_favorites::{FavoritesStore, JsonFileKv};
use bazaar_suggest::{KeywordSuggester, SuggestionGateway, SuggestionRequest};
use bazaar_web::{create_router, AppState};
use bazaar_wizard::{CategoryDetails, MemorySink};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct FixedSuggester;

#[async_trait]
impl KeywordSuggester for FixedSuggester {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn suggest(&self, _request: &SuggestionRequest) -> bazaar_suggest::Result<Vec<String>> {
        Ok(vec!["sofa".to_string(), "leather".to_string()])
    }
}

struct Harness {
    app: Router,
    sink: MemorySink,
    dir: TempDir,
    cookie: Option<String>,
}

impl Harness {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let favorites = FavoritesStore::open(JsonFileKv::at_path(dir.path().join("favorites.json")));
        let sink = MemorySink::new();
        let state = AppState::new(
            Catalog::sample(),
            favorites,
            SuggestionGateway::new(Arc::new(FixedSuggester)),
            Arc::new(sink.clone()),
        );
        Self {
            app: create_router(Arc::new(state)),
            sink,
            dir,
            cookie: None,
        }
    }

    /// Send a request, replaying and capturing the draft cookie
    async fn send(&mut self, mut builder: axum::http::request::Builder, body: Body) -> Response {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.as_str());
        }
        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        if let Some(set) = response.headers().get(header::SET_COOKIE) {
            let pair = set.to_str().unwrap().split(';').next().unwrap().to_string();
            self.cookie = Some(pair);
        }
        response
    }

    async fn get(&mut self, uri: &str) -> Response {
        self.send(Request::get(uri), Body::empty()).await
    }

    async fn post_form(&mut self, uri: &str, fields: &[(&str, &str)]) -> Response {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        let builder = Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(builder, Body::from(body)).await
    }

    async fn post_json(&mut self, uri: &str, value: Value) -> Response {
        let builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        self.send(builder, Body::from(value.to_string())).await
    }
}

async fn text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn json_body(response: Response) -> Value {
    serde_json::from_str(&text(response).await).unwrap()
}

fn ids(value: &Value) -> Vec<&str> {
    value["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_health() {
    let mut h = Harness::new();
    let response = h.get("/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["listings"], 8);
    assert_eq!(body["favorites_loaded"], true);
}

#[tokio::test]
async fn test_product_queries() {
    let mut h = Harness::new();

    let guitar = json_body(h.get("/api/products?q=GUITAR").await).await;
    assert_eq!(ids(&guitar), ["3"]);

    let bikes = json_body(h.get("/api/products?category=Bikes").await).await;
    assert_eq!(ids(&bikes), ["2", "8"]);

    let all = json_body(h.get("/api/products?category=all").await).await;
    assert_eq!(all["count"], 8);

    let categories = json_body(h.get("/api/categories").await).await;
    let categories: Vec<&str> = categories.as_array().unwrap().iter().map(|c| c.as_str().unwrap()).collect();
    let mut sorted = categories.clone();
    sorted.sort();
    assert_eq!(categories, sorted);
    assert!(categories.contains(&"Bikes"));
}

#[tokio::test]
async fn test_missing_listing_is_not_found() {
    let mut h = Harness::new();

    assert_eq!(h.get("/api/products/999").await.status(), StatusCode::NOT_FOUND);

    let page = h.get("/listings/999").await;
    assert_eq!(page.status(), StatusCode::NOT_FOUND);
    assert!(text(page).await.contains("Not found"));

    let detail = h.get("/listings/3").await;
    assert_eq!(detail.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_browse_page_and_fragment() {
    let mut h = Harness::new();

    let page = text(h.get("/?category=Bikes").await).await;
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("/listings/2"));
    assert!(!page.contains("/listings/1\""));

    let response = h
        .send(Request::get("/?q=zzzz").header("HX-Request", "true"), Body::empty())
        .await;
    let fragment = text(response).await;
    assert!(!fragment.contains("<!DOCTYPE html>"));
    assert!(fragment.contains("No products found"));
}

#[tokio::test]
async fn test_favorite_toggle_round_trip_and_persistence() {
    let mut h = Harness::new();

    let on = json_body(h.post_json("/api/favorites/3/toggle", json!({})).await).await;
    assert_eq!(on["favorite"], true);
    assert_eq!(on["ids"], json!(["3"]));

    let reopened = FavoritesStore::open(JsonFileKv::at_path(h.dir.path().join("favorites.json")));
    assert!(reopened.is_favorite("3"));

    let off = json_body(h.post_json("/api/favorites/3/toggle", json!({})).await).await;
    assert_eq!(off["favorite"], false);
    assert_eq!(off["ids"], json!([]));

    let unknown = h.post_json("/api/favorites/999/toggle", json!({})).await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let listed = json_body(h.get("/api/favorites").await).await;
    assert_eq!(listed["loaded"], true);
}

#[tokio::test]
async fn test_favorite_form_redirects_back() {
    let mut h = Harness::new();
    let response = h
        .post_form("/favorites/5/toggle", &[("next", "/?category=Electronics")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/?category=Electronics");

    let page = text(h.get("/favorites").await).await;
    assert!(page.contains("/listings/5"));
}

#[tokio::test]
async fn test_sell_flow_for_cars() {
    let mut h = Harness::new();

    let start = h.get("/sell").await;
    assert!(h.cookie.as_deref().unwrap().starts_with("bazaar_draft="));
    assert!(text(start).await.contains("Choose a category"));

    let form = text(h.get("/sell?category=Cars").await).await;
    assert!(form.contains("detail-form"));

    let incomplete = h
        .post_form("/sell/details", &[("category", "Cars"), ("brand", "Maruti")])
        .await;
    assert_eq!(incomplete.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(text(incomplete).await.contains("Year is required."));

    let done = h
        .post_form(
            "/sell/details",
            &[
                ("category", "Cars"),
                ("brand", "Maruti"),
                ("year", "2018"),
                ("km_driven", "42000"),
                ("ad_title", "Swift VXi"),
                ("description", "Single owner, serviced"),
                ("price", "4,50,000"),
            ],
        )
        .await;
    assert_eq!(done.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        done.headers()[header::LOCATION],
        "/sell?category=Cars&details_submitted=true"
    );

    let listing = text(h.get("/sell?category=Cars&details_submitted=true").await).await;
    assert!(listing.contains("Car details"));

    let submitted = h
        .post_form(
            "/sell/submit",
            &[
                ("category", "Cars"),
                ("details_submitted", "true"),
                ("title", "Maruti Swift 2018"),
                ("description", "Well kept hatchback, single owner."),
                ("price", "4,50,000"),
                ("keywords", "swift, hatchback"),
                ("location", "Pune"),
                ("contact", "seller@example.com"),
            ],
        )
        .await;
    assert_eq!(submitted.status(), StatusCode::OK);
    assert!(text(submitted).await.contains("Listing Submitted!"));

    let records = h.sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category, "Cars");
    assert_eq!(records[0].price, 450000);
    match &records[0].category_details {
        Some(CategoryDetails::Car(car)) => assert_eq!(car.year, 2018),
        other => panic!("expected car details, got {other:?}"),
    }
}

#[tokio::test]
async fn test_typed_details_flag_sends_seller_to_detail_form() {
    let mut h = Harness::new();

    let page = h.get("/sell?category=Cars&details_submitted=true").await;
    assert_eq!(page.status(), StatusCode::SEE_OTHER);
    assert_eq!(page.headers()[header::LOCATION], "/sell?category=Cars");

    let submitted = h
        .post_form(
            "/sell/submit",
            &[
                ("category", "Cars"),
                ("details_submitted", "true"),
                ("title", "Maruti Swift 2018"),
                ("description", "Well kept hatchback, single owner."),
                ("price", "4,50,000"),
                ("keywords", "swift, hatchback"),
                ("location", "Pune"),
                ("contact", "seller@example.com"),
            ],
        )
        .await;
    assert_eq!(submitted.status(), StatusCode::SEE_OTHER);
    assert_eq!(submitted.headers()[header::LOCATION], "/sell?category=Cars");
    assert!(h.sink.records().is_empty());

    let form = text(h.get("/sell?category=Cars").await).await;
    assert!(form.contains("detail-form"));
}

#[tokio::test]
async fn test_description_minimum_boundary() {
    let mut h = Harness::new();
    h.get("/sell?category=Bikes").await;

    let listing = |description: &'static str| {
        vec![
            ("category", "Bikes"),
            ("title", "Road bike"),
            ("description", description),
            ("price", "12,000"),
            ("keywords", "bike"),
            ("location", "Pune"),
            ("contact", "rider@example.com"),
        ]
    };

    let short = h.post_form("/sell/submit", &listing("abcdefghijklmnopqrs")).await;
    assert_eq!(short.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(text(short)
        .await
        .contains("Description must be at least 20 characters long."));
    assert!(h.sink.records().is_empty());

    let ok = h.post_form("/sell/submit", &listing("abcdefghijklmnopqrst")).await;
    assert_eq!(ok.status(), StatusCode::OK);
    let records = h.sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price, 12000);
    assert!(records[0].category_details.is_none());
}

#[tokio::test]
async fn test_photo_gallery_keeps_cover_identity() {
    let mut h = Harness::new();
    h.get("/sell?category=Mobiles&subcategory=Mobile%20Phones").await;

    let set = json_body(
        h.post_json("/api/sell/photos", json!({ "urls": ["a.jpg", "b.jpg", "c.jpg"] }))
            .await,
    )
    .await;
    assert_eq!(set["cover_index"], 0);

    let set = json_body(h.post_json("/api/sell/photos/cover", json!({ "index": 2 })).await).await;
    assert_eq!(set["cover_index"], 2);

    let set = json_body(
        h.post_json("/api/sell/photos/reorder", json!({ "from": 2, "to": 0 }))
            .await,
    )
    .await;
    assert_eq!(set["urls"], json!(["c.jpg", "a.jpg", "b.jpg"]));
    assert_eq!(set["cover_index"], 0);

    let set = json_body(
        h.post_json("/api/sell/photos/reorder", json!({ "from": 1, "to": 2 }))
            .await,
    )
    .await;
    assert_eq!(set["urls"], json!(["c.jpg", "b.jpg", "a.jpg"]));
    assert_eq!(set["cover_index"], 0);

    let set = json_body(h.post_json("/api/sell/photos/remove", json!({ "index": 0 })).await).await;
    assert_eq!(set["urls"], json!(["b.jpg", "a.jpg"]));
    assert_eq!(set["cover_index"], 0);

    let bad = h.post_json("/api/sell/photos/cover", json!({ "index": 9 })).await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_photos_need_a_photo_form() {
    let mut h = Harness::new();
    h.get("/sell?category=Cars").await;
    let response = h
        .post_json("/api/sell/photos", json!({ "urls": ["a.jpg"] }))
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_suggestions_and_keyword_accept() {
    let mut h = Harness::new();
    h.get("/sell?category=Furniture").await;

    let blank = h
        .post_json("/api/suggest", json!({ "title": "Sofa", "description": "  " }))
        .await;
    assert_eq!(blank.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = json_body(
        h.post_json(
            "/api/suggest",
            json!({ "title": "Sofa", "description": "Leather three seater" }),
        )
        .await,
    )
    .await;
    assert_eq!(response["success"], true);
    assert_eq!(response["data"]["suggestedKeywords"], json!(["sofa", "leather"]));

    let first = json_body(h.post_json("/api/sell/keywords", json!({ "keyword": "sofa" })).await).await;
    assert_eq!(first["keywords"], "sofa");
    let again = json_body(h.post_json("/api/sell/keywords", json!({ "keyword": "sofa" })).await).await;
    assert_eq!(again["keywords"], "sofa");
    let more = json_body(h.post_json("/api/sell/keywords", json!({ "keyword": "leather" })).await).await;
    assert_eq!(more["keywords"], "sofa, leather");
}

#[tokio::test]
async fn test_unknown_paths() {
    let mut h = Harness::new();
    let api = h.get("/api/nope").await;
    assert_eq!(api.status(), StatusCode::NOT_FOUND);
    assert!(json_body(api).await["error"].is_string());

    let page = h.get("/nope").await;
    assert_eq!(page.status(), StatusCode::NOT_FOUND);
    assert!(text(page).await.contains("Not found"));
}
