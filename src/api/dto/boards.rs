use serde::Deserialize;

/// Body of both board creation and board edits.
#[derive(Debug, Deserialize)]
pub struct BoardRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListBoardsQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
}
