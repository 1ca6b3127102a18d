use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Add2faRequest {
    #[serde(rename = "is2FNeeded")]
    pub is_2f_needed: Option<bool>,
}
