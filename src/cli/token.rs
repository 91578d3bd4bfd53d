// src/cli/token.rs
use super::TokenAction;
use crate::credentials::{self, TokenSource};
use crate::sheets::SheetResult;

pub fn run(action: TokenAction) -> SheetResult<()> {
    match action {
        TokenAction::Set { token } => {
            credentials::store_access_token(&token)?;
            println!("Access token stored in the OS keyring.");
        }
        TokenAction::Clear => {
            if credentials::clear_access_token()? {
                println!("Access token removed from the OS keyring.");
            } else {
                println!("No access token was stored.");
            }
        }
        TokenAction::Status => match credentials::find_access_token()? {
            Some((_, TokenSource::Environment)) => {
                println!("Using token from ${}.", credentials::ENV_ACCESS_TOKEN)
            }
            Some((_, TokenSource::Keyring)) => println!("Using token from the OS keyring."),
            None => println!("No access token configured."),
        },
    }
    Ok(())
}
