//! Task detail, status updates, and comments from both roles.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use taskdesk_integration_tests::TestContext;

#[tokio::test]
async fn test_employee_dashboard_shows_only_own_tasks() {
    let mut ctx = TestContext::new().await;
    ctx.seed_employee("bob", "pw1").await;
    ctx.seed_task("Bob task", "bob").await;
    ctx.seed_task("Alice task", "alice").await;
    ctx.login("bob", "pw1").await;

    let page = ctx.get("/employee/dashboard").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Bob task"));
    assert!(!page.body.contains("Alice task"));
    assert!(page.body.contains("<span class=\"stat-value\">1</span>"));

    let page = ctx.get("/employee/dashboard?status=review").await;
    assert!(!page.body.contains("Bob task"));
}

#[tokio::test]
async fn test_employee_updates_status_and_comments() {
    let mut ctx = TestContext::new().await;
    ctx.seed_employee("bob", "pw1").await;
    let task = ctx.seed_task("Write report", "bob").await;
    ctx.login("bob", "pw1").await;
    let task_path = format!("/task/{task}");

    let detail = ctx.get(&task_path).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Write report"));

    ctx.post(
        "/update_task_status",
        &[("task_id", &task.to_string()), ("status", "in_progress")],
    )
    .await
    .assert_redirect(&task_path);
    let detail = ctx.get(&task_path).await;
    assert!(detail.body.contains("Task status updated successfully"));

    ctx.post(
        "/add_comment",
        &[("task_id", &task.to_string()), ("comment", "Started on it")],
    )
    .await
    .assert_redirect(&task_path);
    let detail = ctx.get(&task_path).await;
    assert!(detail.body.contains("Comment added successfully"));
    assert!(detail.body.contains("Started on it"));

    let stored = ctx.task(task).await;
    assert_eq!(stored.status.as_str(), "in_progress");
    assert!(stored.updated_at.unwrap() >= stored.created_at);
    assert_eq!(stored.comments.len(), 1);
    assert_eq!(stored.comments[0].username, "bob");
    assert_eq!(stored.comments[0].author, "bob (full name)");
}

#[tokio::test]
async fn test_any_status_transition_is_allowed() {
    let mut ctx = TestContext::new().await;
    let task = ctx.seed_task("Loop", "bob").await;
    ctx.login_admin().await;
    let id = task.to_string();

    for status in ["completed", "assigned", "on_hold"] {
        ctx.post("/update_task_status", &[("task_id", &id), ("status", status)])
            .await
            .assert_redirect(&format!("/task/{task}"));
        assert_eq!(ctx.task(task).await.status.as_str(), status);
    }

    // A non-standard status still renders
    let detail = ctx.get(&format!("/task/{task}")).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("<option value=\"on_hold\" selected>"));
}

#[tokio::test]
async fn test_comments_from_both_roles_keep_order() {
    let mut admin = TestContext::new().await;
    admin.seed_employee("bob", "pw1").await;
    let task = admin.seed_task("Shared", "bob").await;
    let id = task.to_string();
    admin.login_admin().await;

    let mut bob = admin.new_client();
    bob.login("bob", "pw1").await;

    admin
        .post("/add_comment", &[("task_id", &id), ("comment", "first")])
        .await;
    bob.post("/add_comment", &[("task_id", &id), ("comment", "second")])
        .await;
    admin
        .post("/add_comment", &[("task_id", &id), ("comment", "third")])
        .await;

    let comments = admin.task(task).await.comments;
    let texts: Vec<_> = comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["first", "second", "third"]);
    assert_eq!(comments[0].author, "System Administrator");
    assert_eq!(comments[1].username, "bob");
}

#[tokio::test]
async fn test_unknown_task_flashes_and_redirects_to_dashboard() {
    let mut ctx = TestContext::new().await;
    ctx.seed_employee("bob", "pw1").await;
    ctx.login("bob", "pw1").await;

    ctx.get("/task/00000000-0000-4000-8000-000000000000")
        .await
        .assert_redirect("/employee/dashboard");
    let page = ctx.get("/employee/dashboard").await;
    assert!(page.body.contains("Task not found"));

    ctx.get("/task/garbage")
        .await
        .assert_redirect("/employee/dashboard");
}

#[tokio::test]
async fn test_mutating_unknown_task_is_not_found() {
    let mut ctx = TestContext::new().await;
    ctx.login_admin().await;

    ctx.post(
        "/update_task_status",
        &[
            ("task_id", "00000000-0000-4000-8000-000000000000"),
            ("status", "completed"),
        ],
    )
    .await
    .assert_redirect("/admin/dashboard");
    ctx.post("/add_comment", &[("task_id", "nope"), ("comment", "hi")])
        .await
        .assert_redirect("/admin/dashboard");

    let page = ctx.get("/admin/dashboard").await;
    assert!(page.body.contains("Task not found"));
}

#[tokio::test]
async fn test_comment_text_is_escaped() {
    let mut ctx = TestContext::new().await;
    let task = ctx.seed_task("Escaping", "bob").await;
    ctx.login_admin().await;

    ctx.post(
        "/add_comment",
        &[("task_id", &task.to_string()), ("comment", "<b>bold</b>")],
    )
    .await;
    let detail = ctx.get(&format!("/task/{task}")).await;
    assert!(!detail.body.contains("<b>bold</b>"));
    assert!(detail.body.contains("&#60;b&#62;bold&#60;/b&#62;"));
}
