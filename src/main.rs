mod cli;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use grackdb_provider::{
    GrackdbClient, ProviderConfig, ReadOutcome, ResourceLifecycle, get_resource,
    read_current_user, render_state,
};

use cli::{Cli, Command, DiscordAccountCommand, UserCommand};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = GrackdbClient::new(ProviderConfig {
        api_url: cli.api_url,
        token: cli.token,
    })?;

    match cli.command {
        Command::User { command } => {
            let resource = get_resource("grackdb_user")?;
            match command {
                UserCommand::Create(args) => {
                    let state = resource.create(&client, &args.declared()).await?;
                    println!("{}", render_state(&state));
                }
                UserCommand::Read(args) => {
                    report_read(resource.read(&client, &args.id).await?);
                }
                UserCommand::Update(args) => {
                    let state = resource
                        .update(&client, &args.id, &args.change_set())
                        .await?;
                    println!("{}", render_state(&state));
                }
                UserCommand::Delete(args) => {
                    resource.delete(&client, &args.id).await?;
                    tracing::info!(id = %args.id, "user deleted");
                }
            }
        }
        Command::DiscordAccount { command } => {
            let resource = get_resource("grackdb_discord_account")?;
            match command {
                DiscordAccountCommand::Create(args) => {
                    let state = resource.create(&client, &args.declared()).await?;
                    println!("{}", render_state(&state));
                }
                DiscordAccountCommand::Read(args) => {
                    report_read(resource.read(&client, &args.id).await?);
                }
                DiscordAccountCommand::Update(args) => {
                    let state = resource
                        .update(&client, &args.id, &args.change_set())
                        .await?;
                    println!("{}", render_state(&state));
                }
                DiscordAccountCommand::Delete(args) => {
                    resource.delete(&client, &args.id).await?;
                    tracing::info!(id = %args.id, "discord account deleted");
                }
            }
        }
        Command::CurrentUser => {
            let state = read_current_user(&client).await?;
            println!("{}", render_state(&state));
        }
    }

    Ok(())
}

/// Not-found is drift, not a failure; report it and leave state handling to
/// the operator.
fn report_read(outcome: ReadOutcome) {
    match outcome {
        ReadOutcome::Found(state) => println!("{}", render_state(&state)),
        ReadOutcome::NotFound(diagnostic) => eprintln!("{diagnostic}"),
    }
}
