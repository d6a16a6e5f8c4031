use serde::Deserialize;

use crate::form::SgpaForm;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub form: SgpaForm,
}
