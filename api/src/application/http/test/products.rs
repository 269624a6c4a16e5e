use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{Value, json};
use test_context::test_context;

use super::{ApiContext, FAILING_IMAGE, UnconfiguredApiContext};

fn image(name: &str, bytes: &[u8]) -> Part {
    Part::bytes(bytes.to_vec())
        .file_name(name.to_string())
        .mime_type("image/png")
}

async fn analyze(ctx: &ApiContext, names: &[&str]) -> Vec<Value> {
    let form = names.iter().fold(MultipartForm::new(), |form, name| {
        form.add_part("images", image(&format!("{name}.png"), name.as_bytes()))
    });

    let response = ctx.server.post("/api/products/analyze").multipart(form).await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["results"].as_array().cloned().unwrap_or_default()
}

#[test_context(ApiContext)]
#[tokio::test]
async fn empty_store_lists_nothing(ctx: &mut ApiContext) {
    let response = ctx.server.get("/api/products").await;

    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[test_context(ApiContext)]
#[tokio::test]
async fn analyze_stores_each_image_and_reports_failures_inline(ctx: &mut ApiContext) {
    let form = MultipartForm::new()
        .add_part("images", image("serum.png", b"Serum"))
        .add_part("images", image("broken.png", FAILING_IMAGE))
        .add_part("images", image("toner.png", b"Toner"));

    let response = ctx.server.post("/api/products/analyze").multipart(form).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);

    assert_eq!(results[0]["name"], "Serum");
    assert_eq!(results[0]["expiryDate"], "2027-03");
    assert!(results[0].get("timeLeft").is_none() || results[0]["timeLeft"].is_null());
    assert_eq!(results[0]["ingredients"][1]["safetyRating"], "caution");

    assert_eq!(results[1]["error"], "Failed to analyze image");
    assert_eq!(results[1]["filename"], "broken.png");
    assert!(results[1]["details"].is_string());

    assert_eq!(results[2]["name"], "Toner");

    let products: Vec<Value> = ctx.server.get("/api/products").await.json();
    assert_eq!(products.len(), 2);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn list_is_newest_first(ctx: &mut ApiContext) {
    for name in ["First", "Second", "Third"] {
        analyze(ctx, &[name]).await;
    }

    let products: Vec<Value> = ctx.server.get("/api/products").await.json();
    let names: Vec<&str> = products.iter().filter_map(|p| p["name"].as_str()).collect();

    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn analyze_without_images_is_rejected(ctx: &mut ApiContext) {
    let response = ctx
        .server
        .post("/api/products/analyze")
        .multipart(MultipartForm::new().add_text("note", "no files here"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "No images provided");
}

#[test_context(ApiContext)]
#[tokio::test]
async fn analyze_rejects_non_images(ctx: &mut ApiContext) {
    let form = MultipartForm::new().add_part(
        "images",
        Part::bytes(b"plain text".to_vec())
            .file_name("notes.txt")
            .mime_type("text/plain"),
    );

    let response = ctx.server.post("/api/products/analyze").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let products: Vec<Value> = ctx.server.get("/api/products").await.json();
    assert!(products.is_empty());
}

#[test_context(ApiContext)]
#[tokio::test]
async fn analyze_rejects_more_than_ten_images(ctx: &mut ApiContext) {
    let form = (0..11).fold(MultipartForm::new(), |form, i| {
        form.add_part("images", image(&format!("{i}.png"), b"Serum"))
    });

    let response = ctx.server.post("/api/products/analyze").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(UnconfiguredApiContext)]
#[tokio::test]
async fn analyze_without_credential_reports_each_file(ctx: &mut UnconfiguredApiContext) {
    let form = MultipartForm::new()
        .add_part("images", image("serum.png", b"Serum"))
        .add_part("images", image("toner.png", b"Toner"));

    let response = ctx.server.post("/api/products/analyze").multipart(form).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    for (result, filename) in results.iter().zip(["serum.png", "toner.png"]) {
        assert_eq!(result["error"], "Failed to analyze image");
        assert_eq!(result["filename"], filename);
        assert!(result["details"].as_str().unwrap().contains("GEMINI_API_KEY"));
    }

    let products: Vec<Value> = ctx.server.get("/api/products").await.json();
    assert!(products.is_empty());
}

#[test_context(ApiContext)]
#[tokio::test]
async fn analyze_rejects_oversized_images(ctx: &mut ApiContext) {
    let oversized = vec![0u8; 10 * 1024 * 1024 + 1];
    let form = MultipartForm::new()
        .add_part("images", image("serum.png", b"Serum"))
        .add_part("images", image("huge.png", &oversized));

    let response = ctx.server.post("/api/products/analyze").multipart(form).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("huge.png"));
    assert!(error.contains("10 MB"));

    let products: Vec<Value> = ctx.server.get("/api/products").await.json();
    assert!(products.is_empty());
}

#[test_context(ApiContext)]
#[tokio::test]
async fn get_product_checks_the_id(ctx: &mut ApiContext) {
    let response = ctx.server.get("/api/products/abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Invalid product ID");

    let response = ctx.server.get("/api/products/42").await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"], "Product not found");

    let stored = analyze(ctx, &["Serum"]).await;
    let id = stored[0]["id"].as_i64().unwrap();

    let response = ctx.server.get(&format!("/api/products/{id}")).await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), stored[0]);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn compare_returns_products_and_side_by_side_view(ctx: &mut ApiContext) {
    let stored = analyze(ctx, &["Serum", "Toner"]).await;
    let first = stored[0]["id"].as_i64().unwrap();
    let second = stored[1]["id"].as_i64().unwrap();

    let response = ctx
        .server
        .post("/api/products/compare")
        .json(&json!({ "productIds": [second, 999, first] }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["products"][0]["name"], "Toner");
    assert_eq!(body["products"][1]["name"], "Serum");
    assert_eq!(body["comparison"].as_array().unwrap().len(), 2);
    assert_eq!(body["comparison"][0]["productId"], second);
    // (5 + 3) / 2 = 4
    assert_eq!(body["comparison"][0]["overallSafety"], "Good");
    assert_eq!(body["comparison"][0]["moreIngredients"], 0);
    assert_eq!(body["comparison"][0]["timeLeftPercentage"], 0.0);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn compare_needs_two_known_products(ctx: &mut ApiContext) {
    let stored = analyze(ctx, &["Serum"]).await;
    let id = stored[0]["id"].as_i64().unwrap();

    let response = ctx
        .server
        .post("/api/products/compare")
        .json(&json!({ "productIds": [id, 999] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "At least 2 valid products are required for comparison"
    );

    let response = ctx
        .server
        .post("/api/products/compare")
        .json(&json!({ "productIds": [id] }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "At least 2 product IDs are required for comparison"
    );

    let response = ctx
        .server
        .post("/api/products/compare")
        .json(&json!({ "productIds": "1,2" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn delete_removes_the_product_once(ctx: &mut ApiContext) {
    let stored = analyze(ctx, &["Serum"]).await;
    let id = stored[0]["id"].as_i64().unwrap();

    let response = ctx.server.delete("/api/products/abc").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"], "Invalid product ID");

    let response = ctx.server.delete(&format!("/api/products/{id}")).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "message": "Product deleted successfully" }));

    ctx.server
        .get(&format!("/api/products/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ctx.server
        .delete(&format!("/api/products/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let next = analyze(ctx, &["Toner"]).await;
    assert!(next[0]["id"].as_i64().unwrap() > id);
}

#[test_context(ApiContext)]
#[tokio::test]
async fn openapi_document_lists_product_routes(ctx: &mut ApiContext) {
    let response = ctx.server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let document: Value = response.json();
    assert!(document["paths"].get("/api/products").is_some());
    assert!(document["paths"].get("/api/products/{product_id}").is_some());
}
