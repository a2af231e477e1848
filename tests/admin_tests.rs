use actix_web::{http::StatusCode, test};
use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

#[macro_use]
mod common;

use common::{TestContext, bearer};

#[actix_web::test]
async fn employees_cannot_use_admin_endpoints() {
    let ctx = TestContext::new();
    let app = test_app!(ctx.state);
    let employee = ctx.register_employee().await;

    for uri in ["/api/v1/admin/overview", "/api/v1/admin/employees"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(bearer(&employee.token))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN, "{}", uri);
    }
}

#[actix_web::test]
async fn overview_counts_todays_records() {
    let ctx = TestContext::new();
    let app = test_app!(ctx.state);
    let admin = ctx.register_admin().await;
    let early = ctx.register_employee().await;
    let late = ctx.register_employee().await;
    ctx.register_employee().await;

    // Yesterday's session is not part of today's overview.
    ctx.clock.advance(-Duration::days(1));
    ctx.state.ledger.clock_in(early.employee.id).await.unwrap();
    ctx.clock.advance(Duration::hours(8));
    ctx.state.ledger.clock_out(early.employee.id).await.unwrap();
    ctx.clock.advance(Duration::hours(16));

    ctx.state.ledger.clock_in(early.employee.id).await.unwrap();
    ctx.clock.advance(Duration::hours(1));
    ctx.state.ledger.clock_in(late.employee.id).await.unwrap();
    ctx.clock.advance(Duration::hours(1));
    ctx.state.ledger.clock_out(early.employee.id).await.unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/overview")
        .insert_header(bearer(&admin.token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    let data = &body["data"];

    assert_eq!(data["totalEmployees"], 4);
    assert_eq!(data["clockedIn"], 1);
    assert_eq!(data["completed"], 1);

    let today = data["today"].as_array().unwrap();
    assert_eq!(today.len(), 2);
    assert_eq!(today[0]["employeeId"], late.employee.id.to_string());
    assert_eq!(today[0]["employee"]["name"], late.employee.name);
    assert_eq!(today[1]["employee"]["department"], early.employee.department);
    assert_eq!(today[1]["workMinutes"], 120);
}

#[actix_web::test]
async fn roster_lists_every_employee_newest_first() {
    let ctx = TestContext::new();
    let app = test_app!(ctx.state);
    let admin = ctx.register_admin().await;
    let newest = ctx.register_employee().await;

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/employees")
        .insert_header(bearer(&admin.token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let roster = body["data"].as_array().unwrap();

    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0]["id"], newest.employee.id.to_string());
    assert_eq!(roster[1]["role"], "admin");
}

#[actix_web::test]
async fn admin_can_promote_another_employee() {
    let ctx = TestContext::new();
    let app = test_app!(ctx.state);
    let admin = ctx.register_admin().await;
    let employee = ctx.register_employee().await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admin/employees/{}/role", employee.employee.id))
        .insert_header(bearer(&admin.token))
        .set_json(json!({ "role": "admin" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["role"], "admin");

    // The old token still says "employee"; access follows the stored role.
    let req = test::TestRequest::get()
        .uri("/api/v1/admin/employees")
        .insert_header(bearer(&employee.token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn demoted_admin_loses_access_immediately() {
    let ctx = TestContext::new();
    let app = test_app!(ctx.state);
    let first = ctx.register_admin().await;
    let second = ctx.register_admin().await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admin/employees/{}/role", first.employee.id))
        .insert_header(bearer(&second.token))
        .set_json(json!({ "role": "employee" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/v1/admin/overview")
        .insert_header(bearer(&first.token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn admins_cannot_change_their_own_role() {
    let ctx = TestContext::new();
    let app = test_app!(ctx.state);
    let admin = ctx.register_admin().await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admin/employees/{}/role", admin.employee.id))
        .insert_header(bearer(&admin.token))
        .set_json(json!({ "role": "employee" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn role_change_for_unknown_employee_is_not_found() {
    let ctx = TestContext::new();
    let app = test_app!(ctx.state);
    let admin = ctx.register_admin().await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/admin/employees/{}/role", uuid::Uuid::new_v4()))
        .insert_header(bearer(&admin.token))
        .set_json(json!({ "role": "admin" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn role_change_with_a_malformed_id_is_a_json_bad_request() {
    let ctx = TestContext::new();
    let app = test_app!(ctx.state);
    let admin = ctx.register_admin().await;

    let req = test::TestRequest::put()
        .uri("/api/v1/admin/employees/not-a-uuid/role")
        .insert_header(bearer(&admin.token))
        .set_json(json!({ "role": "admin" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], false);
}
