//! Sign-in and profile CLI commands
//!
//! Passwords may be given with `--password`; otherwise they are read from
//! the terminal without echo.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::display::format_user_details;
use crate::error::{FintrackError, FintrackResult};
use crate::models::user::image_data_uri;
use crate::services::AuthService;
use crate::storage::Storage;

/// Authentication subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in
    Login {
        email: String,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "FINTRACK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Signup {
        name: String,
        email: String,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "FINTRACK_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Password confirmation (prompted when omitted)
        #[arg(long)]
        confirm: Option<String>,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,
}

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Change name and/or email
    Update {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,
    },

    /// Upload a profile picture from an image file
    Picture {
        /// Image file (png, jpg, gif, webp or svg)
        file: PathBuf,
    },

    /// Go back to the default avatar
    RemovePicture,
}

pub fn handle_auth_command(storage: &Storage, cmd: AuthCommands) -> FintrackResult<()> {
    let auth = AuthService::new(storage);

    match cmd {
        AuthCommands::Login { email, password } => {
            let password = password_or_prompt(password, "Password: ")?;
            let user = auth.login(&email, &password)?;
            println!("Logged in as {} <{}>", user.name, user.email);
        }

        AuthCommands::Signup {
            name,
            email,
            password,
            confirm,
        } => {
            let password = password_or_prompt(password, "Password: ")?;
            let confirm = password_or_prompt(confirm, "Confirm password: ")?;
            let user = auth.sign_up(&name, &email, &password, &confirm)?;
            println!("Welcome, {}! Signed in as {}", user.name, user.email);
        }

        AuthCommands::Logout => match auth.logout()? {
            Some(user) => println!("Logged out {}", user.email),
            None => println!("Not logged in."),
        },

        AuthCommands::Whoami => match auth.current_user()? {
            Some(user) => print!("{}", format_user_details(&user)),
            None => println!("Not logged in."),
        },
    }

    Ok(())
}

pub fn handle_profile_command(storage: &Storage, cmd: ProfileCommands) -> FintrackResult<()> {
    let auth = AuthService::new(storage);

    match cmd {
        ProfileCommands::Update { name, email } => {
            let current = auth
                .current_user()?
                .ok_or_else(|| FintrackError::Auth("Not logged in".into()))?;
            let name = name.unwrap_or(current.name);
            let email = email.unwrap_or(current.email);

            let user = auth.update_profile(&name, &email)?;
            println!("Profile updated.");
            print!("{}", format_user_details(&user));
        }

        ProfileCommands::Picture { file } => {
            let data_uri = read_image(&file)?;
            auth.update_profile_picture(&data_uri)?;
            println!("Profile picture updated from {}", file.display());
        }

        ProfileCommands::RemovePicture => {
            auth.remove_profile_picture()?;
            println!("Profile picture reset to the default avatar.");
        }
    }

    Ok(())
}

fn password_or_prompt(given: Option<String>, prompt: &str) -> FintrackResult<String> {
    match given {
        Some(password) => Ok(password),
        None => rpassword::prompt_password(prompt)
            .map_err(|e| FintrackError::Io(format!("Failed to read password: {}", e))),
    }
}

/// Image MIME subtype from a file extension
fn image_subtype(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("png"),
        "jpg" | "jpeg" => Some("jpeg"),
        "gif" => Some("gif"),
        "webp" => Some("webp"),
        "svg" => Some("svg+xml"),
        _ => None,
    }
}

fn read_image(path: &Path) -> FintrackResult<String> {
    let subtype = image_subtype(path).ok_or_else(|| {
        FintrackError::Validation(format!("Unsupported image type: {}", path.display()))
    })?;
    let bytes = std::fs::read(path)
        .map_err(|e| FintrackError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(image_data_uri(subtype, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_image_subtype() {
        assert_eq!(image_subtype(Path::new("me.PNG")), Some("png"));
        assert_eq!(image_subtype(Path::new("me.jpg")), Some("jpeg"));
        assert_eq!(image_subtype(Path::new("me.txt")), None);
        assert_eq!(image_subtype(Path::new("me")), None);
    }

    #[test]
    fn test_read_image_builds_data_uri() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("avatar.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let uri = read_image(&path).unwrap();
        assert_eq!(uri, "data:image/gif;base64,R0lGODlh");
    }
}
