//! Admin flows: employees, task assignment, and the dashboard.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use taskdesk_integration_tests::TestContext;

fn employee_form<'a>(username: &'a str, password: &'a str) -> [(&'a str, &'a str); 4] {
    [
        ("username", username),
        ("email", "new@company.com"),
        ("full_name", "New Hire"),
        ("password", password),
    ]
}

#[tokio::test]
async fn test_add_employee_then_login() {
    let mut ctx = TestContext::new().await;
    ctx.login_admin().await;

    ctx.post("/admin/add_employee", &employee_form("carol", "s3cret"))
        .await
        .assert_redirect("/admin/employees");

    let page = ctx.get("/admin/employees").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Employee added successfully"));
    assert!(page.body.contains("carol"));

    // Flash is shown once
    let again = ctx.get("/admin/employees").await;
    assert!(!again.body.contains("Employee added successfully"));

    let mut carol = ctx.new_client();
    carol
        .login("carol", "s3cret")
        .await
        .assert_redirect("/employee/dashboard");
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let mut ctx = TestContext::new().await;
    ctx.seed_employee("carol", "original").await;
    ctx.login_admin().await;

    ctx.post("/admin/add_employee", &employee_form("carol", "replaced"))
        .await
        .assert_redirect("/admin/employees");
    let page = ctx.get("/admin/employees").await;
    assert!(page.body.contains("Username already exists"));

    assert_eq!(ctx.employees().await.len(), 1);
    let mut carol = ctx.new_client();
    carol
        .login("carol", "original")
        .await
        .assert_redirect("/employee/dashboard");
}

#[tokio::test]
async fn test_admin_username_cannot_be_reused() {
    let mut ctx = TestContext::new().await;
    ctx.login_admin().await;

    ctx.post("/admin/add_employee", &employee_form("admin", "pw"))
        .await
        .assert_redirect("/admin/employees");
    assert!(ctx.employees().await.is_empty());
}

#[tokio::test]
async fn test_delete_employee_keeps_their_tasks() {
    let mut ctx = TestContext::new().await;
    let bob = ctx.seed_employee("bob", "pw1").await;
    let task = ctx.seed_task("Orphan", "bob").await;
    ctx.login_admin().await;

    ctx.get(&format!("/delete_employee/{}", bob.id))
        .await
        .assert_redirect("/admin/employees");
    let page = ctx.get("/admin/employees").await;
    assert!(page.body.contains("Employee deleted successfully"));
    assert!(ctx.employees().await.is_empty());

    // The task still names the deleted username
    assert_eq!(ctx.task(task).await.assigned_to, "bob");

    let mut bob_client = ctx.new_client();
    let response = bob_client.login("bob", "pw1").await;
    assert!(response.body.contains("Invalid username or password"));
}

#[tokio::test]
async fn test_delete_unknown_or_malformed_id_is_harmless() {
    let mut ctx = TestContext::new().await;
    ctx.seed_employee("bob", "pw1").await;
    ctx.login_admin().await;

    ctx.get("/delete_employee/not-an-id")
        .await
        .assert_redirect("/admin/employees");
    ctx.get("/delete_employee/00000000-0000-4000-8000-000000000000")
        .await
        .assert_redirect("/admin/employees");
    assert_eq!(ctx.employees().await.len(), 1);
}

#[tokio::test]
async fn test_add_task_form_lists_employees() {
    let mut ctx = TestContext::new().await;
    ctx.seed_employee("bob", "pw1").await;
    ctx.login_admin().await;

    let page = ctx.get("/admin/add_task").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("value=\"bob\""));
}

#[tokio::test]
async fn test_add_task_assigns_and_flashes() {
    let mut ctx = TestContext::new().await;
    ctx.seed_employee("bob", "pw1").await;
    ctx.login_admin().await;

    ctx.post(
        "/admin/add_task",
        &[
            ("title", "Write report"),
            ("description", "Quarterly numbers"),
            ("assigned_to", "bob"),
            ("priority", "high"),
            ("due_date", "someday"),
        ],
    )
    .await
    .assert_redirect("/admin/dashboard");

    let dashboard = ctx.get("/admin/dashboard").await;
    assert!(dashboard.body.contains("Task assigned successfully"));
    assert!(dashboard.body.contains("Write report"));

    let tasks = ctx.tasks().await;
    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task.status.as_str(), "assigned");
    assert_eq!(task.created_by, "admin");
    assert_eq!(task.due_date, "someday");
    assert!(task.comments.is_empty());
}

#[tokio::test]
async fn test_add_task_with_missing_field_is_rejected() {
    let mut ctx = TestContext::new().await;
    ctx.login_admin().await;

    let response = ctx
        .post("/admin/add_task", &[("title", "No assignee")])
        .await;
    assert!(response.status.is_client_error());
    assert!(ctx.tasks().await.is_empty());
}

#[tokio::test]
async fn test_admin_dashboard_filters_and_global_stats() {
    let mut ctx = TestContext::new().await;
    ctx.seed_task("Bob one", "bob").await;
    ctx.seed_task("Bob two", "bob").await;
    ctx.seed_task("Alice one", "alice").await;
    ctx.login_admin().await;

    let page = ctx.get("/admin/dashboard?employee=alice").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Alice one"));
    assert!(!page.body.contains("Bob one"));
    // Stats stay global
    assert!(page.body.contains("<span class=\"stat-value\">3</span>"));

    let page = ctx.get("/admin/dashboard?status=all&employee=all").await;
    assert!(page.body.contains("Alice one"));
    assert!(page.body.contains("Bob two"));

    // Filter values match exactly
    let page = ctx.get("/admin/dashboard?status=%20assigned").await;
    assert!(page.body.contains("No tasks match these filters."));
    assert!(!page.body.contains("<option value=\"assigned\" selected>"));

    let page = ctx.get("/admin/dashboard?status=completed").await;
    assert!(page.body.contains("No tasks match these filters."));
    assert!(page.body.contains("<option value=\"completed\" selected>"));
}
