use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskrank::dispatch::ServiceClient;
use taskrank::render::Tier;
use taskrank::task::{TaskForm, TaskList};
use taskrank::workspace::Workspace;

async fn mock_service() -> (MockServer, ServiceClient) {
    let server = MockServer::start().await;
    let client = ServiceClient::new(&format!("{}/api/tasks", server.uri()), None).unwrap();
    (server, client)
}

#[test]
fn add_writes_normalized_task_to_buffer_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("tasks.json");
    std::fs::write(&file, "[]").unwrap();

    let mut workspace = Workspace::new(TaskList::load(&file).unwrap());
    workspace
        .add_task(&TaskForm {
            title: "Write spec".to_string(),
            dependencies: "2, backend".to_string(),
            ..TaskForm::default()
        })
        .unwrap();
    workspace.tasks().save(&file).unwrap();

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&file).unwrap()).unwrap();
    assert_eq!(
        written,
        json!([{
            "title": "Write spec",
            "due_date": null,
            "estimated_hours": 1,
            "importance": 5,
            "dependencies": [2, "backend"]
        }])
    );
}

#[tokio::test]
async fn analyze_then_failed_suggest_keeps_cards() {
    let (server, client) = mock_service().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/analyze/"))
        .and(query_param("strategy", "smart_balance"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "title": "A", "score": 150 }])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/suggest/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "cycle detected" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut workspace = Workspace::new(TaskList::from_buffer(r#"[{"title": "A"}]"#).unwrap());

    workspace.run_analysis(&client, "smart_balance").await.unwrap();
    assert_eq!(
        workspace.summary(),
        Some("Analyzed 1 task(s) using \"smart_balance\" strategy.")
    );
    let rendered = workspace.results().unwrap().to_string();
    assert!(rendered.starts_with("A  [High (150)]"), "{rendered}");

    let err = workspace
        .run_suggestion(&client, "smart_balance")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "cycle detected");
    assert_eq!(workspace.results().unwrap().to_string(), rendered);
}

#[tokio::test]
async fn suggestion_scenario() {
    let (server, client) = mock_service().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks/suggest/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": "2 picks",
            "suggested_tasks": [{ "title": "B", "score": 70, "in_cycle": true }]
        })))
        .mount(&server)
        .await;

    let mut workspace = Workspace::default();
    workspace.run_suggestion(&client, "smart_balance").await.unwrap();

    assert_eq!(workspace.summary(), Some("2 picks"));
    let cards = workspace.results().unwrap().cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].badge.tier, Tier::Medium);
    assert!(cards[0].meta.contains("In cycle: Yes"));
}
