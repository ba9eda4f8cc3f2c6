/// Integration tests for `/category`

mod common;

use axum::http::{Method, StatusCode};
use common::TestContext;

const FOOD: &str =
    "/category?expense_category=Food&category_description=Meals&userId=2&categoryColor=red";

#[tokio::test]
async fn test_create_and_list_by_user() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send_text(Method::POST, FOOD).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Expense category was added successfully");

    let (status, categories) = ctx.send_json(Method::GET, "/category?userId=2").await;
    assert_eq!(status, StatusCode::OK);

    let categories = categories.as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["expense_category"], "Food");
    assert_eq!(categories[0]["categoryColor"], "red");
    assert_eq!(categories[0]["category_budget"], 0);
    assert_eq!(categories[0]["userId"], 2);
}

#[tokio::test]
async fn test_list_by_id_takes_precedence() {
    let ctx = TestContext::new().await.unwrap();

    ctx.send(Method::POST, FOOD).await;
    ctx.send(
        Method::POST,
        "/category?expense_category=Rent&category_description=Flat&userId=2&categoryColor=blue",
    )
    .await;

    let (_, all) = ctx.send_json(Method::GET, "/category?userId=2").await;
    let rent_id = all
        .as_array()
        .unwrap()
        .iter()
        .find(|category| category["expense_category"] == "Rent")
        .unwrap()["id"]
        .as_i64()
        .unwrap();

    let (status, selected) = ctx
        .send_json(Method::GET, &format!("/category?id={rent_id}&userId=2"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(selected.as_array().unwrap().len(), 1);
    assert_eq!(selected[0]["expense_category"], "Rent");
}

#[tokio::test]
async fn test_list_without_categories() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send_text(Method::GET, "/category?userId=7").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "No categories found");
}

#[tokio::test]
async fn test_list_without_selector() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send_text(Method::GET, "/category").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        "Error: Missing id or userId in URL parameters\n[object Request]"
    );
    assert!(ctx.db.statements().is_empty());
}

#[tokio::test]
async fn test_duplicate_category_is_accepted_unchanged() {
    let ctx = TestContext::new().await.unwrap();

    ctx.send(Method::POST, FOOD).await;
    let (status, body) = ctx
        .send_text(
            Method::POST,
            "/category?expense_category=Food&category_description=Groceries&userId=2&categoryColor=green",
        )
        .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, "Category already exists");

    let rows = ctx.sql("SELECT * FROM ExpenseCategory").await;
    assert_eq!(rows.rows.len(), 1);
    assert_eq!(rows.rows[0]["categoryColor"], "red");
}

#[tokio::test]
async fn test_edit_existing_category() {
    let ctx = TestContext::new().await.unwrap();

    ctx.send(Method::POST, FOOD).await;
    ctx.send(
        Method::POST,
        "/category?expense_category=Food&category_description=Meals&userId=3&categoryColor=red",
    )
    .await;
    let (_, before) = ctx.send_json(Method::GET, "/category?userId=2").await;
    let id = before[0]["id"].as_i64().unwrap();

    let (status, edited) = ctx
        .send_json(
            Method::POST,
            "/category?expense_category=Food&category_description=Groceries&userId=2&categoryColor=green&category_budget=300&edit=1",
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(edited.as_array().unwrap().len(), 1);
    assert_eq!(edited[0]["id"], id);
    assert_eq!(edited[0]["expense_category"], "Food");
    assert_eq!(edited[0]["userId"], 2);
    assert_eq!(edited[0]["category_description"], "Groceries");
    assert_eq!(edited[0]["categoryColor"], "green");
    assert_eq!(edited[0]["category_budget"], 300);

    let (_, other) = ctx.send_json(Method::GET, "/category?userId=3").await;
    assert_eq!(other.as_array().unwrap().len(), 1);
    assert_eq!(other[0]["expense_category"], "Food");
    assert_eq!(other[0]["category_description"], "Meals");
    assert_eq!(other[0]["categoryColor"], "red");
    assert_eq!(other[0]["category_budget"], 0);
}

#[tokio::test]
async fn test_same_name_for_another_user_is_created() {
    let ctx = TestContext::new().await.unwrap();

    ctx.send(Method::POST, FOOD).await;
    let (status, _) = ctx
        .send_text(
            Method::POST,
            "/category?expense_category=Food&category_description=Meals&userId=3&categoryColor=red",
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let rows = ctx.sql("SELECT * FROM ExpenseCategory").await;
    assert_eq!(rows.rows.len(), 2);
}

#[tokio::test]
async fn test_create_requires_fields() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send_text(Method::POST, "/category?expense_category=Food&userId=2")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Missing category_description");
    assert!(ctx.db.statements().is_empty());
}

#[tokio::test]
async fn test_unsupported_method() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send_text(Method::DELETE, "/category?id=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Invalid request method");
}
