use clap::Parser;
use miette::Result;
use stockfeed::cli::{commands, logging, Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    logging::init(&cli.global);

    match cli.command {
        Commands::Run(args) => commands::run::run(args, &cli.global),
        Commands::Inspect(args) => commands::inspect::run(args, &cli.global),
        Commands::Config(cmd) => commands::config::run(cmd, &cli.global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
