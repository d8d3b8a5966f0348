//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

/// A word with one or more translations.
pub fn word(id: &str, value: &str, translations: &[&str]) -> Value {
    let translations: Vec<Value> = translations
        .iter()
        .enumerate()
        .map(|(i, t)| json!({ "id": format!("{}-t{}", id, i), "value": t }))
        .collect();
    json!({
        "id": id,
        "value": value,
        "translations": translations,
        "category": "basics",
        "complexity": 1
    })
}

/// Three French words: cat, dog, house.
pub fn french_words() -> Vec<Value> {
    vec![
        word("w1", "cat", &["chat"]),
        word("w2", "dog", &["chien"]),
        word("w3", "house", &["maison", "foyer"]),
    ]
}

/// Create-session body for a mode, optionally for a signed-in user.
pub fn create_session_request(mode: &str, user_id: Option<&str>, words: Vec<Value>) -> Value {
    let mut body = json!({
        "word_list_id": "list-fr",
        "mode": mode,
        "words": words
    });
    if let Some(user_id) = user_id {
        body["user_id"] = json!(user_id);
    }
    body
}

/// Answer body for flashcards.
pub fn self_report(correct: bool) -> Value {
    json!({ "correct": correct })
}

/// Answer body for writing, listening and quiz.
pub fn response(text: &str) -> Value {
    json!({ "response": text })
}
