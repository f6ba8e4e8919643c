mod helpers;

use axum::http::StatusCode;
use helpers::{spawn_fake_wikipedia, temp_service, unreachable_endpoint};
use notebook::store::NoteStore;
use notebook::tools::params::{AddNoteParams, GetNotesByTopicParams, LookupWikipediaParams};
use notebook::tools::NotebookTools;
use rmcp::handler::server::wrapper::Parameters;
use serde_json::{json, Value};

fn add(topic: &str, text: &str, timestamp: Option<&str>) -> Parameters<AddNoteParams> {
    Parameters(AddNoteParams {
        topic: topic.into(),
        text: text.into(),
        timestamp: timestamp.map(String::from),
    })
}

fn get(topic: &str) -> Parameters<GetNotesByTopicParams> {
    Parameters(GetNotesByTopicParams {
        topic: topic.into(),
    })
}

fn lookup(term: &str) -> Parameters<LookupWikipediaParams> {
    Parameters(LookupWikipediaParams { term: term.into() })
}

#[tokio::test]
async fn add_then_get_returns_json_notes() {
    let (_tmp, _store, service) = temp_service(&unreachable_endpoint().await);
    let tools = NotebookTools::new(service);

    assert_eq!(
        tools.add_note(add("cooking", "preheat oven", Some("01.01.2024 09:00:00"))).await,
        Ok("true".to_string())
    );
    assert_eq!(
        tools.add_note(add("cooking", "boil eggs", Some("01.01.2024 10:00:00"))).await,
        Ok("true".to_string())
    );

    let text = tools.get_notes_by_topic(get("cooking")).await.unwrap();
    let notes: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        notes,
        json!([
            {"text": "preheat oven", "timestamp": "01.01.2024 09:00:00"},
            {"text": "boil eggs", "timestamp": "01.01.2024 10:00:00"},
        ])
    );
}

#[tokio::test]
async fn unknown_topic_is_an_empty_list() {
    let (_tmp, _store, service) = temp_service(&unreachable_endpoint().await);
    let tools = NotebookTools::new(service);
    assert_eq!(tools.get_notes_by_topic(get("nothing")).await, Ok("[]".to_string()));
}

#[tokio::test]
async fn unstorable_note_reports_false() {
    let (_tmp, store, service) = temp_service(&unreachable_endpoint().await);
    let tools = NotebookTools::new(service);

    assert_eq!(
        tools.add_note(add("t", "bell\u{7}char", None)).await,
        Ok("false".to_string())
    );
    assert!(NoteStore::open(store.path()).is_ok());
}

#[tokio::test]
async fn lookup_attaches_once() {
    let wiki = spawn_fake_wikipedia(
        StatusCode::OK,
        json!([
            "Egg",
            ["Egg"],
            ["An egg is an organic vessel."],
            ["https://en.wikipedia.org/wiki/Egg"]
        ]),
    )
    .await;
    let (_tmp, store, service) = temp_service(&wiki.endpoint);
    let tools = NotebookTools::new(service);

    // No topic yet.
    assert_eq!(tools.lookup_wikipedia(lookup("Egg")).await, Ok("false".to_string()));

    tools.add_note(add("Egg", "boil for 7 minutes", None)).await.unwrap();
    assert_eq!(tools.lookup_wikipedia(lookup("Egg")).await, Ok("true".to_string()));
    assert_eq!(tools.lookup_wikipedia(lookup("Egg")).await, Ok("false".to_string()));

    let reference = store.topic("Egg").unwrap().unwrap().reference.unwrap();
    assert_eq!(reference.title, "Egg");
    assert_eq!(reference.url, "https://en.wikipedia.org/wiki/Egg");
}

#[tokio::test]
async fn unreachable_lookup_is_a_tool_error() {
    let (_tmp, _store, service) = temp_service(&unreachable_endpoint().await);
    let tools = NotebookTools::new(service);
    tools.add_note(add("Egg", "x", None)).await.unwrap();

    let err = tools.lookup_wikipedia(lookup("Egg")).await.unwrap_err();
    assert!(err.starts_with("lookup failed"), "{err}");
}
