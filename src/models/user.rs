use serde::{Deserialize, Serialize};

/// Public profile of a platform member, as much as the timeline needs.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub screenname: String,
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    pub fn is_team_member(&self) -> bool {
        self.roles
            .iter()
            .any(|role| matches!(role.as_str(), "team" | "admin" | "space-host"))
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| role == "admin")
    }
}
