mod args;

pub use args::{
    Cli, Command, DiscordAccountCommand, DiscordAccountCreateArgs, DiscordAccountUpdateArgs,
    IdArgs, UserCommand, UserCreateArgs, UserUpdateArgs,
};
