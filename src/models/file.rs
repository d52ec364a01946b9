use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct File {
    pub id: String,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub user: String,
    pub initial_comment: Option<InitialComment>,
    pub url_private_download: Option<String>,
}

impl File {
    pub fn comment(&self) -> Option<&str> {
        self.initial_comment.as_ref().map(|c| c.comment.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InitialComment {
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct FilesListResponse {
    pub files: Vec<File>,
    pub paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
pub struct FileInfoResponse {
    pub file: File,
}

#[derive(Debug, Deserialize)]
pub struct FileUploadResponse {
    pub file: File,
}

#[derive(Debug, Deserialize)]
pub struct Paging {
    pub count: u32,
    pub total: u32,
    pub page: u32,
    pub pages: u32,
}
