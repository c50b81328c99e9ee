//! Theme and user CLI commands

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{ThemePreference, User, UserId};
use crate::state::LedgerState;

/// User subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Show the stored user
    Show,
    /// Create or update the stored user
    Set {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        avatar: Option<String>,
    },
}

/// Show the theme, or change it when `theme` is given
pub async fn handle_theme_command(state: &LedgerState, theme: Option<String>) -> LedgerResult<()> {
    let preferences = match theme {
        Some(value) => {
            let theme: ThemePreference = value.parse().map_err(LedgerError::Validation)?;
            state.set_theme(theme).await?
        }
        None => state.fetch_preferences().await?,
    };

    println!("Theme: {}", preferences.theme);
    Ok(())
}

pub async fn handle_user_command(state: &LedgerState, cmd: UserCommands) -> LedgerResult<()> {
    match cmd {
        UserCommands::Show => match state.fetch_user().await? {
            Some(user) => {
                println!("User:   {}", user.id);
                println!("Name:   {}", user.name);
                println!("Email:  {}", user.email);
                if let Some(avatar) = &user.avatar_url {
                    println!("Avatar: {}", avatar);
                }
            }
            None => println!("No user stored."),
        },

        UserCommands::Set {
            name,
            email,
            avatar,
        } => {
            // keep the id and preferences of whoever is stored
            let saved = state
                .save_user_with(move |existing| {
                    let id = existing
                        .as_ref()
                        .map(|u| u.id.clone())
                        .unwrap_or_else(UserId::new);
                    let mut user = User::new(id, name, email);
                    user.preferences = existing.and_then(|u| u.preferences);
                    match avatar {
                        Some(avatar) => user.with_avatar(avatar),
                        None => user,
                    }
                })
                .await?;
            println!("Saved user {} <{}>", saved.name, saved.email);
        }
    }

    Ok(())
}
