//! Profile management commands.

use dockhand_core::config::{Profile, ProfileStore};

use crate::cli::ProfileCommands;
use crate::error::CliError;

/// Profile command handler.
pub fn run(store: &ProfileStore, command: ProfileCommands) -> Result<(), CliError> {
    match command {
        ProfileCommands::Add {
            name,
            host,
            user,
            port,
            key,
            password,
        } => {
            let password = if password {
                rpassword::prompt_password("Password to store: ")?
            } else {
                String::new()
            };

            let profile = Profile {
                name: name.clone(),
                host,
                user,
                password,
                port,
                key_path: key,
            };

            let mut profiles = store.load()?;
            profiles.retain(|p| p.name != name);
            profiles.push(profile);
            store.save(&profiles)?;
            println!("Saved profile '{name}'");
            Ok(())
        }

        ProfileCommands::List => {
            let profiles = store.load()?;
            if profiles.is_empty() {
                println!("No profiles saved");
                return Ok(());
            }
            println!("{:<20} {:<32} AUTH", "NAME", "ENDPOINT");
            for profile in &profiles {
                let endpoint = format!("{}@{}:{}", profile.user, profile.host, profile.port);
                let auth = if profile.key_path.is_some() {
                    "key"
                } else if profile.password.is_empty() {
                    "prompt"
                } else {
                    "password"
                };
                println!("{:<20} {:<32} {auth}", profile.name, endpoint);
            }
            Ok(())
        }

        ProfileCommands::Remove { name } => {
            let mut profiles = store.load()?;
            let before = profiles.len();
            profiles.retain(|p| p.name != name);
            if profiles.len() == before {
                return Err(CliError::ProfileNotFound(name));
            }
            store.save(&profiles)?;
            println!("Removed profile '{name}'");
            Ok(())
        }
    }
}
