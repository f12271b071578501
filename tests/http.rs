use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use serde_json::Value;
use shuowang::chinese::fmt::sexagenary_year;
use shuowang::chinese::{ChineseCalendar, LunarCalendar};
use shuowang::server::{self, AppState};

fn test_server() -> TestServer {
    let app = server::router(Arc::new(AppState::new(ChineseCalendar::default())));
    TestServer::new(app).unwrap()
}

async fn get_year(server: &TestServer, year: &str) -> TestResponse {
    server.get("/").add_query_param("year", year).await
}

fn entries(response: &TestResponse) -> Vec<Value> {
    assert_eq!(StatusCode::OK, response.status_code());
    assert_eq!("application/json", response.header("content-type"));
    response.json()
}

#[tokio::test]
async fn year_2023() {
    let server = test_server();
    let entries = entries(&get_year(&server, "2023").await);
    assert_eq!(26, entries.len());

    let first = &entries[0];
    assert_eq!("2023-01-22", first["date"]);
    assert_eq!("癸卯年正月初一", first["lunar"]);

    let calendar = ChineseCalendar::default();
    let date = shuowang::Date::from_gregorian(2023, 1, 22).unwrap();
    let prefix = sexagenary_year(calendar.lunar_date(date).unwrap().year) + "年";
    assert!(first["lunar"].as_str().unwrap().starts_with(&prefix));

    assert_eq!("癸卯年閏二月初一", entries[4]["lunar"]);
    assert_eq!("2023-03-22", entries[4]["date"]);
}

#[tokio::test]
async fn entry_shape() {
    let server = test_server();
    for entry in entries(&get_year(&server, "2024").await) {
        let object = entry.as_object().unwrap();
        assert_eq!(2, object.len());
        assert_eq!(10, object["date"].as_str().unwrap().len());
        assert!(object["lunar"].as_str().unwrap().starts_with("甲辰年"));
    }
}

#[tokio::test]
async fn year_without_leap_month() {
    let server = test_server();
    let entries = entries(&get_year(&server, "2024").await);
    assert_eq!(24, entries.len());
    assert_eq!("2024-02-10", entries[0]["date"]);
    assert_eq!("2025-01-14", entries[23]["date"]);
    assert_eq!("甲辰年十二月十五", entries[23]["lunar"]);
}

#[tokio::test]
async fn malformed_year_is_current_year() {
    let server = test_server();
    let default = server.get("/").await.text();
    for year in ["notanumber", "", "20x3", " 2023"] {
        assert_eq!(default, get_year(&server, year).await.text(), "{year:?}");
    }
    let other_param = server.get("/").add_query_param("foo", "bar").await;
    assert_eq!(default, other_param.text());
}

#[tokio::test]
async fn unsupported_year() {
    let server = test_server();
    for year in ["1800", "99999"] {
        let response = get_year(&server, year).await;
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status_code());
        assert!(response.as_bytes().is_empty());
    }
}

#[tokio::test]
async fn unknown_route() {
    let response = test_server().get("/lunar").await;
    assert_eq!(StatusCode::NOT_FOUND, response.status_code());
}
