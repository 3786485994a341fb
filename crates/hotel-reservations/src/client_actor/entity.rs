//! [`ActorEntity`] implementation for [`Client`].

use super::ClientError;
use crate::model::{Client, ClientCreate, ClientId, ClientUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

/// Clients have no custom actions.
#[derive(Debug)]
pub enum ClientAction {}

fn check_email(email: &str) -> Result<(), ClientError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(ClientError::ValidationError(format!("invalid email address: {email:?}"))),
    }
}

#[async_trait]
impl ActorEntity for Client {
    type Id = ClientId;
    type Create = ClientCreate;
    type Update = ClientUpdate;
    type Action = ClientAction;
    type ActionResult = ();
    type Context = ();
    type Error = ClientError;

    fn from_create_params(id: ClientId, params: ClientCreate) -> Result<Self, Self::Error> {
        check_email(&params.email)?;
        Ok(Self {
            id,
            name: params.name,
            email: params.email,
        })
    }

    async fn on_update(&mut self, update: ClientUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            check_email(&email)?;
            self.email = email;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ClientAction, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_must_have_both_parts() {
        assert!(check_email("ana@example.com").is_ok());
        assert!(check_email("ana@").is_err());
        assert!(check_email("@example.com").is_err());
        assert!(check_email("ana.example.com").is_err());
    }
}
