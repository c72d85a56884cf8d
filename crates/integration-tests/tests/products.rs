//! Integration tests for product CRUD, validation, and pagination.

use reqwest::StatusCode;
use serde_json::{Value, json};

use catalog_integration_tests::{
    base_url, client, create_category, create_product, price_of, unique,
};

/// An id far outside anything the serial sequence will have produced.
const ABSENT_ID: i32 = i32::MAX;

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_create_product_returns_created_record() {
    let client = client();
    let (category_id, _) = create_category(&client, &unique("beverages")).await;
    let name = unique("espresso");

    let (_, body) = create_product(&client, &name, 3.50, category_id).await;

    assert_eq!(body["status"], json!(true));
    assert_eq!(body["data"]["name"], json!(name));
    assert_eq!(body["data"]["category_id"], json!(category_id.as_i32()));
    assert!((price_of(&body["data"]) - 3.50).abs() < f64::EPSILON);
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_create_product_non_positive_price_rejected() {
    let client = client();
    let (category_id, _) = create_category(&client, &unique("beverages")).await;

    for price in [0.0, -5.0] {
        let resp = client
            .post(format!("{}/api/products/create", base_url()))
            .json(&json!({
                "name": unique("espresso"),
                "price": price,
                "category_id": category_id.as_i32(),
            }))
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.expect("Failed to parse response");
        assert_eq!(body["status"], json!(false));
        assert_eq!(
            body["msg"],
            json!("Product price is required and must be a positive number.")
        );
    }
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_create_product_missing_category_rejected() {
    let client = client();

    let resp = client
        .post(format!("{}/api/products/create", base_url()))
        .json(&json!({ "name": unique("espresso"), "price": 3.50 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], json!("Product category is required."));
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_create_product_unknown_category_rejected() {
    let client = client();

    let resp = client
        .post(format!("{}/api/products/create", base_url()))
        .json(&json!({
            "name": unique("espresso"),
            "price": 3.50,
            "category_id": ABSENT_ID,
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], json!("Product category does not exist."));
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_duplicate_product_name_rejected() {
    let client = client();
    let (category_id, _) = create_category(&client, &unique("beverages")).await;
    let name = unique("espresso");
    create_product(&client, &name, 3.50, category_id).await;

    let resp = client
        .post(format!("{}/api/products/create", base_url()))
        .json(&json!({
            "name": name,
            "price": 4.00,
            "category_id": category_id.as_i32(),
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["msg"], json!("Product name already exists."));
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_fetch_missing_product_returns_404() {
    let client = client();

    let resp = client
        .get(format!("{}/api/products/fetch/{ABSENT_ID}", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], json!(false));
    assert_eq!(body["msg"], json!("Product not found."));
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_fetch_malformed_product_id_rejected() {
    let client = client();

    let resp = client
        .get(format!("{}/api/products/fetch/not-a-number", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_fetch_by_id_resolves_category() {
    let client = client();
    let category_name = unique("beverages");
    let (category_id, _) = create_category(&client, &category_name).await;
    let (product_id, _) =
        create_product(&client, &unique("espresso"), 3.50, category_id).await;

    let resp = client
        .get(format!(
            "{}/api/products/fetch/{}",
            base_url(),
            product_id.as_i32()
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["category"]["name"], json!(category_name));
    assert_eq!(
        body["data"]["category"]["id"],
        json!(category_id.as_i32())
    );
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_partial_update_leaves_other_fields_unchanged() {
    let client = client();
    let (category_id, _) = create_category(&client, &unique("beverages")).await;
    let name = unique("espresso");
    let (product_id, _) = create_product(&client, &name, 3.50, category_id).await;

    let resp = client
        .put(format!(
            "{}/api/products/update/{}",
            base_url(),
            product_id.as_i32()
        ))
        .json(&json!({ "price": 50 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!((price_of(&body["data"]) - 50.0).abs() < f64::EPSILON);
    assert_eq!(body["data"]["name"], json!(name));
    assert_eq!(body["data"]["category"]["id"], json!(category_id.as_i32()));

    // Refetch to confirm persistence
    let resp = client
        .get(format!(
            "{}/api/products/fetch/{}",
            base_url(),
            product_id.as_i32()
        ))
        .send()
        .await
        .expect("Failed to refetch product");
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!((price_of(&body["data"]) - 50.0).abs() < f64::EPSILON);
    assert_eq!(body["data"]["name"], json!(name));
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_update_missing_product_returns_404() {
    let client = client();

    let resp = client
        .put(format!("{}/api/products/update/{ABSENT_ID}", base_url()))
        .json(&json!({ "price": 10 }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_update_rejects_invalid_fields() {
    let client = client();
    let (category_id, _) = create_category(&client, &unique("beverages")).await;
    let (product_id, _) =
        create_product(&client, &unique("espresso"), 3.50, category_id).await;

    for body in [json!({ "name": "   " }), json!({ "price": -1 })] {
        let resp = client
            .put(format!(
                "{}/api/products/update/{}",
                base_url(),
                product_id.as_i32()
            ))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_delete_twice_second_returns_404() {
    let client = client();
    let (category_id, _) = create_category(&client, &unique("beverages")).await;
    let (product_id, _) =
        create_product(&client, &unique("espresso"), 3.50, category_id).await;

    let url = format!("{}/api/products/delete/{}", base_url(), product_id.as_i32());

    let resp = client.delete(&url).send().await.expect("Failed to delete");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], json!(true));
    assert!(body["data"].is_null());

    let resp = client.delete(&url).send().await.expect("Failed to delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_pagination_second_page_of_fifteen() {
    let client = client();
    let (category_id, _) = create_category(&client, &unique("beverages")).await;

    // A shared unique prefix isolates this test's products from other data.
    let prefix = unique("paged");
    for i in 0..15 {
        create_product(&client, &format!("{prefix}-{i:02}"), 1.00, category_id).await;
    }

    let resp = client
        .get(format!(
            "{}/api/products/fetch?name={prefix}&page=2&limit=10",
            base_url()
        ))
        .send()
        .await
        .expect("Failed to fetch products");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    let data = &body["data"];
    assert_eq!(data["page"], json!(2));
    assert_eq!(data["limit"], json!(10));
    assert_eq!(data["total_items"], json!(15));
    assert_eq!(data["total_pages"], json!(2));
    assert_eq!(data["items"].as_array().expect("items array").len(), 5);
}

#[tokio::test]
#[ignore = "Requires running catalog server and database"]
async fn test_list_filter_is_case_insensitive() {
    let client = client();
    let (category_id, _) = create_category(&client, &unique("beverages")).await;
    let name = unique("Macchiato");
    create_product(&client, &name, 4.20, category_id).await;

    let resp = client
        .get(format!(
            "{}/api/products/fetch?name={}",
            base_url(),
            name.to_lowercase()
        ))
        .send()
        .await
        .expect("Failed to fetch products");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    let items = body["data"]["items"].as_array().expect("items array");
    assert!(
        items.iter().any(|item| item["name"] == json!(name)),
        "case-insensitive filter should match the created product"
    );
}
