use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddNoteParams {
    #[schemars(description = "Topic to file the note under. Created if it does not exist.")]
    pub topic: String,

    #[schemars(description = "Free-text content of the note. May be empty.")]
    pub text: String,

    #[schemars(
        description = "Optional timestamp in DD.MM.YYYY HH:MM:SS format. Defaults to the server's current local time."
    )]
    pub timestamp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetNotesByTopicParams {
    #[schemars(description = "Exact (case-sensitive) topic name")]
    pub topic: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct LookupWikipediaParams {
    #[schemars(
        description = "Search term. The first Wikipedia hit is attached to the topic with this exact name."
    )]
    pub term: String,
}
