use clap::{Parser, Subcommand};
use grackdb_provider::{ChangeSet, DEFAULT_API_URL, DeclaredConfig};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// GraphQL endpoint to reconcile against.
    #[arg(long, env = "GRACKDB_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Bearer token; read from the environment when not passed explicitly.
    #[arg(long, env = "GRACKDB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage GrackDB users.
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Manage GrackDB Discord accounts.
    DiscordAccount {
        #[command(subcommand)]
        command: DiscordAccountCommand,
    },
    /// Show the user authenticated by the configured token.
    CurrentUser,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    Create(UserCreateArgs),
    Read(IdArgs),
    Update(UserUpdateArgs),
    Delete(IdArgs),
}

#[derive(Subcommand, Debug)]
pub enum DiscordAccountCommand {
    Create(DiscordAccountCreateArgs),
    Read(IdArgs),
    Update(DiscordAccountUpdateArgs),
    Delete(IdArgs),
}

#[derive(clap::Args, Debug)]
pub struct IdArgs {
    #[arg(long)]
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct UserCreateArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub avatar_url: Option<String>,
}

impl UserCreateArgs {
    pub fn declared(&self) -> DeclaredConfig {
        let mut declared = DeclaredConfig::new().set("username", self.username.clone());
        if let Some(avatar_url) = &self.avatar_url {
            declared = declared.set("avatar_url", avatar_url.clone());
        }
        declared
    }
}

#[derive(clap::Args, Debug)]
pub struct UserUpdateArgs {
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub username: Option<String>,

    /// Pass an empty string to clear the avatar.
    #[arg(long)]
    pub avatar_url: Option<String>,
}

impl UserUpdateArgs {
    /// Flags present on the command line form the change set.
    pub fn change_set(&self) -> ChangeSet {
        let mut changes = ChangeSet::new();
        if let Some(username) = &self.username {
            changes = changes.set("username", username.clone());
        }
        if let Some(avatar_url) = &self.avatar_url {
            changes = changes.set("avatar_url", avatar_url.clone());
        }
        changes
    }
}

#[derive(clap::Args, Debug)]
pub struct DiscordAccountCreateArgs {
    /// Discord snowflake; immutable once created.
    #[arg(long)]
    pub discord_id: String,

    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub discriminator: String,

    /// ID of the owning GrackDB user.
    #[arg(long)]
    pub owner: Option<String>,
}

impl DiscordAccountCreateArgs {
    pub fn declared(&self) -> DeclaredConfig {
        let mut declared = DeclaredConfig::new()
            .set("discord_id", self.discord_id.clone())
            .set("username", self.username.clone())
            .set("discriminator", self.discriminator.clone());
        if let Some(owner) = &self.owner {
            declared = declared.set("owner", owner.clone());
        }
        declared
    }
}

#[derive(clap::Args, Debug)]
pub struct DiscordAccountUpdateArgs {
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub discriminator: Option<String>,

    #[arg(long)]
    pub owner: Option<String>,
}

impl DiscordAccountUpdateArgs {
    pub fn change_set(&self) -> ChangeSet {
        let mut changes = ChangeSet::new();
        if let Some(username) = &self.username {
            changes = changes.set("username", username.clone());
        }
        if let Some(discriminator) = &self.discriminator {
            changes = changes.set("discriminator", discriminator.clone());
        }
        if let Some(owner) = &self.owner {
            changes = changes.set("owner", owner.clone());
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;

    #[test]
    fn test_user_create_args() {
        let cli = Cli::parse_from([
            "grackdb-provider",
            "user",
            "create",
            "--username=alice",
            "--avatar-url=https://example.com/a.png",
        ]);

        if let Command::User {
            command: UserCommand::Create(args),
        } = cli.command
        {
            assert_eq!(args.username, "alice");
            assert_eq!(
                args.avatar_url,
                Some("https://example.com/a.png".to_string())
            );
        } else {
            panic!("Expected User Create command, got {:?}", cli.command);
        }
    }

    #[test]
    fn test_user_update_change_set_only_has_given_flags() {
        let cli = Cli::parse_from([
            "grackdb-provider",
            "user",
            "update",
            "--id=U1",
            "--username=bob",
        ]);

        if let Command::User {
            command: UserCommand::Update(args),
        } = cli.command
        {
            let changes = args.change_set();
            let names: Vec<&str> = changes.iter().map(|(name, _)| name).collect();
            assert_eq!(names, vec!["username"]);
        } else {
            panic!("Expected User Update command, got {:?}", cli.command);
        }
    }

    #[test]
    fn test_user_update_empty_avatar_flag_is_tracked() {
        let cli = Cli::parse_from([
            "grackdb-provider",
            "user",
            "update",
            "--id=U1",
            "--avatar-url=",
        ]);

        if let Command::User {
            command: UserCommand::Update(args),
        } = cli.command
        {
            assert_eq!(args.avatar_url, Some(String::new()));
            assert!(!args.change_set().is_empty());
        } else {
            panic!("Expected User Update command, got {:?}", cli.command);
        }
    }

    #[test]
    fn test_discord_account_create_declared() {
        let cli = Cli::parse_from([
            "grackdb-provider",
            "discord-account",
            "create",
            "--discord-id=80351110224678912",
            "--username=nelly",
            "--discriminator=1337",
        ]);

        if let Command::DiscordAccount {
            command: DiscordAccountCommand::Create(args),
        } = cli.command
        {
            let declared = args.declared();
            assert!(declared.get("discord_id").is_some());
            assert!(declared.get("owner").is_none());
        } else {
            panic!("Expected DiscordAccount Create command, got {:?}", cli.command);
        }
    }

    #[test]
    fn test_default_api_url() {
        let cli = Cli::parse_from(["grackdb-provider", "current-user"]);
        assert_eq!(cli.api_url, "https://grackdb.fogo.sh/query");
    }

    #[test]
    #[serial]
    fn test_token_from_env_fallback() {
        let token_backup = std::env::var("GRACKDB_TOKEN").ok();

        unsafe {
            std::env::set_var("GRACKDB_TOKEN", "env_token");
        }

        let cli = Cli::parse_from(["grackdb-provider", "current-user"]);

        unsafe {
            match token_backup {
                Some(token) => std::env::set_var("GRACKDB_TOKEN", token),
                None => std::env::remove_var("GRACKDB_TOKEN"),
            }
        }

        assert_eq!(cli.token, Some("env_token".to_string()));
    }

    #[test]
    #[serial]
    fn test_token_flag_takes_precedence_over_env() {
        let token_backup = std::env::var("GRACKDB_TOKEN").ok();

        unsafe {
            std::env::set_var("GRACKDB_TOKEN", "env_token");
        }

        let cli = Cli::parse_from(["grackdb-provider", "current-user", "--token=cli_token"]);

        unsafe {
            match token_backup {
                Some(token) => std::env::set_var("GRACKDB_TOKEN", token),
                None => std::env::remove_var("GRACKDB_TOKEN"),
            }
        }

        assert_eq!(cli.token, Some("cli_token".to_string()));
    }

    #[test]
    #[serial]
    fn test_no_token_when_env_unset() {
        let token_backup = std::env::var("GRACKDB_TOKEN").ok();
        unsafe {
            std::env::remove_var("GRACKDB_TOKEN");
        }

        let cli = Cli::parse_from(["grackdb-provider", "current-user"]);

        unsafe {
            if let Some(token) = token_backup {
                std::env::set_var("GRACKDB_TOKEN", token);
            }
        }

        assert!(cli.token.is_none());
    }
}
