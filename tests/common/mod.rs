#![allow(dead_code)]

use std::io::Write;

use rest_request::{ClientConfig, RequestClient};
use serde::{Deserialize, Serialize};
use tempfile::{NamedTempFile, TempPath};

pub fn create_file(contents: &str) -> TempPath {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file.into_temp_path()
}

pub fn client() -> RequestClient {
    RequestClient::with_config(ClientConfig::default()).unwrap()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}
