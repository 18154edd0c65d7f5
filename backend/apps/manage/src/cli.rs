//! Command line definition

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "manage")]
#[command(about = "Account administration")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply database migrations
    Migrate,
    /// Create a regular account
    CreateUser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Create the account deactivated
        #[arg(long)]
        inactive: bool,
        /// Grant staff access (without superuser)
        #[arg(long)]
        staff: bool,
    },
    /// Create an active staff superuser
    CreateSuperuser {
        #[arg(long)]
        email: String,
        /// Falls back to ACCOUNTS_SUPERUSER_PASSWORD
        #[arg(long)]
        password: Option<String>,
    },
    /// Check credentials; exits non-zero when they do not match
    Authenticate {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Mark an account inactive
    Deactivate {
        #[arg(long)]
        email: String,
    },
    /// Replace an account's password
    ChangePassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create_user() {
        let cli = Cli::try_parse_from([
            "manage",
            "create-user",
            "--email",
            "a@example.com",
            "--password",
            "pw",
            "--staff",
        ])
        .unwrap();

        match cli.command {
            Command::CreateUser {
                email,
                inactive,
                staff,
                ..
            } => {
                assert_eq!(email, "a@example.com");
                assert!(!inactive);
                assert!(staff);
            }
            _ => panic!("expected create-user"),
        }
    }

    #[test]
    fn test_superuser_password_optional() {
        let cli = Cli::try_parse_from(["manage", "create-superuser", "--email", "a@example.com"]).unwrap();
        assert!(matches!(cli.command, Command::CreateSuperuser { password: None, .. }));
    }

    #[test]
    fn test_missing_email_rejected() {
        assert!(Cli::try_parse_from(["manage", "deactivate"]).is_err());
    }
}
