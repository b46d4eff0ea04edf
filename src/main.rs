use aegis::cli::{commands, output, Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Add {
            ref identifier,
            ref password,
        } => commands::add::execute(&cli, identifier, password.as_deref()),
        Commands::Get {
            ref identifier,
            copy,
        } => commands::get::execute(&cli, identifier, copy),
        Commands::Update {
            ref identifier,
            ref password,
        } => commands::update::execute(&cli, identifier, password.as_deref()),
        Commands::Delete {
            ref identifier,
            force,
        } => commands::delete::execute(&cli, identifier, force),
        Commands::List { reveal, format } => commands::list::execute(&cli, reveal, format),
        Commands::Verify {
            ref identifier,
            ref password,
        } => commands::verify::execute(&cli, identifier, password.as_deref()),
        Commands::Export { ref file } => commands::export::execute(&cli, file),
        Commands::Import { ref file } => commands::import_cmd::execute(&cli, file),
        Commands::Audit { last, ref since } => {
            commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
        Commands::Completions { ref shell } => commands::completions::execute(shell),
        Commands::Version => commands::version::execute(),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
