use serde::{Deserialize, Serialize};

/// Employee document, keyed by an operator-assigned numeric-string id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<Manager>,
}

/// Embedded manager record. Same shape as an employee, minus the nesting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manager {
    pub id: String,
    pub name: String,
    pub email: String,
}
