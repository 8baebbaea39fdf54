//! Car API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{car_body, id_from_location, TestApp};

async fn app_with_owner() -> (TestApp, i64) {
    let app = TestApp::new();
    let owner = app.create_user("owner", &[]).await;
    let id = owner["userId"].as_i64().unwrap();
    (app, id)
}

#[tokio::test]
async fn test_create_car() {
    let (app, owner) = app_with_owner().await;

    let res = app
        .server
        .post(&format!("/api/v1/cars/users/{}", owner))
        .json(&car_body("Toyota", "Corolla", 2020, "LE"))
        .await;

    res.assert_status(StatusCode::CREATED);
    let id: i64 = id_from_location(&res);
    assert_eq!(
        res.json::<Value>(),
        json!({
            "carId": id,
            "make": "Toyota",
            "model": "Corolla",
            "year": 2020,
            "trim": "LE",
            "color": "Red",
            "transmission": "Automatic",
            "fuel": "Gasoline",
            "userId": owner
        })
    );

    let owner_view = app
        .server
        .get(&format!("/api/v1/users/cars/{}", id))
        .await
        .json::<Value>();
    assert_eq!(owner_view["userId"], json!(owner));
}

#[tokio::test]
async fn test_duplicate_car_identity_is_conflict() {
    let (app, owner) = app_with_owner().await;
    app.create_car(owner, "Toyota", "LE").await;

    let res = app
        .server
        .post(&format!("/api/v1/cars/users/{}", owner))
        .json(&car_body("Toyota", "Corolla", 2020, "LE"))
        .await;

    res.assert_status(StatusCode::CONFLICT);
    assert_eq!(
        res.json::<Value>()["message"],
        "This car already exists: Make: Toyota - Model: Corolla - Year: 2020 - Trim: LE"
    );

    // A different trim is a different car
    app.server
        .post(&format!("/api/v1/cars/users/{}", owner))
        .json(&car_body("Toyota", "Corolla", 2020, "XLE"))
        .await
        .assert_status(StatusCode::CREATED);
    assert_eq!(app.store.car_count(), 2);
}

#[tokio::test]
async fn test_create_car_for_unknown_user() {
    let app = TestApp::new();

    let res = app
        .server
        .post("/api/v1/cars/users/999999")
        .json(&car_body("Ford", "Focus", 2018, "SE"))
        .await;

    res.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>()["message"], "User not found! Id: 999999");
    assert_eq!(app.store.car_count(), 0);
}

#[tokio::test]
async fn test_invalid_car_body() {
    let (app, owner) = app_with_owner().await;

    let res = app
        .server
        .post(&format!("/api/v1/cars/users/{}", owner))
        .json(&car_body("Ford", "Model T", 1800, "Base"))
        .await;

    res.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        res.json::<Value>()["errors"][0]["field"],
        "year"
    );
}

#[tokio::test]
async fn test_get_car() {
    let (app, owner) = app_with_owner().await;
    let car = app.create_car(owner, "Mazda", "Sport").await;

    let res = app
        .server
        .get(&format!("/api/v1/cars/{}", car["carId"]))
        .await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>(), car);

    let res = app.server.get("/api/v1/cars/4242").await;
    res.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>()["message"], "Car not found! Id: 4242");
}

#[tokio::test]
async fn test_cars_by_make_is_exact() {
    let (app, owner) = app_with_owner().await;
    app.create_car(owner, "Toyota", "LE").await;
    app.create_car(owner, "Toyota", "SE").await;
    app.create_car(owner, "Honda", "EX").await;

    let res = app.server.get("/api/v1/cars/make/Toyota").await;
    res.assert_status_ok();
    let body = res.json::<Value>();
    assert_eq!(body["totalElements"], 2);
    assert!(body["content"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c["make"] == "Toyota"));

    app.server
        .get("/api/v1/cars/make/toyota")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_cars_by_user() {
    let (app, owner) = app_with_owner().await;
    let other = app.create_user("other", &[]).await;
    let other_id = other["userId"].as_i64().unwrap();
    app.create_car(owner, "Kia", "GT").await;

    let res = app
        .server
        .get(&format!("/api/v1/cars/users/{}", owner))
        .await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>()["content"][0]["userId"], json!(owner));

    app.server
        .get(&format!("/api/v1/cars/users/{}", other_id))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // No existence check on the owner
    app.server
        .get("/api/v1/cars/users/31337")
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_list_cars_paging() {
    let (app, owner) = app_with_owner().await;
    for trim in ["A", "B", "C"] {
        app.create_car(owner, "Subaru", trim).await;
    }

    let res = app
        .server
        .get("/api/v1/cars")
        .add_query_param("page", 0)
        .add_query_param("size", 2)
        .await;
    res.assert_status_ok();
    let body = res.json::<Value>();
    assert_eq!(body["content"].as_array().unwrap().len(), 2);
    assert_eq!(body["size"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["first"], true);
    assert_eq!(body["last"], false);

    app.server
        .get("/api/v1/cars")
        .add_query_param("page", 5)
        .add_query_param("size", 2)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_car_reassigns_owner() {
    let (app, owner) = app_with_owner().await;
    let buyer = app.create_user("buyer", &[]).await;
    let buyer_id = buyer["userId"].as_i64().unwrap();
    let car = app.create_car(owner, "Volvo", "R").await;
    let car_id = car["carId"].as_i64().unwrap();

    let mut body = car_body("Volvo", "Corolla", 2020, "R");
    body["color"] = json!("Blue");
    let res = app
        .server
        .put(&format!("/api/v1/cars/{}/users/{}", car_id, buyer_id))
        .json(&body)
        .await;

    res.assert_status_ok();
    let updated = res.json::<Value>();
    assert_eq!(updated["carId"], json!(car_id));
    assert_eq!(updated["userId"], json!(buyer_id));
    assert_eq!(updated["color"], "Blue");

    let buyer_view = app
        .server
        .get(&format!("/api/v1/users/cars/{}", car_id))
        .await
        .json::<Value>();
    assert_eq!(buyer_view["username"], "buyer");
}

#[tokio::test]
async fn test_update_car_failures() {
    let (app, owner) = app_with_owner().await;
    let car = app.create_car(owner, "Audi", "S").await;
    let car_id = car["carId"].as_i64().unwrap();
    let body = car_body("Audi", "Corolla", 2020, "S");

    app.server
        .put(&format!("/api/v1/cars/999/users/{}", owner))
        .json(&body)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .put(&format!("/api/v1/cars/{}/users/999", car_id))
        .json(&body)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    app.server
        .put(&format!("/api/v1/cars/{}/users/x", car_id))
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_car() {
    let (app, owner) = app_with_owner().await;
    let car = app.create_car(owner, "BMW", "M").await;
    let path = format!("/api/v1/cars/{}", car["carId"]);

    app.server
        .delete(&path)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    app.server
        .get(&path)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    app.server
        .delete(&path)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
