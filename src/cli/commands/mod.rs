pub mod health;
pub mod notes;
pub mod token;

use crate::client::NotesClient;

/// Server and credentials shared by every remote command
#[derive(Debug, Clone)]
pub struct Target {
    pub server: String,
    pub token: Option<String>,
}

impl Target {
    pub fn client(&self) -> anyhow::Result<NotesClient> {
        Ok(NotesClient::new(self.server.clone(), self.token.clone())?)
    }
}
