use clap::Parser;
use miette::Result;
use sit::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    // This is standard practice for CLI tools that output to stdout.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
    let global = cli.global;

    match cli.command {
        Commands::List(args) => sit::cli::commands::list::run(args, &global),
        Commands::Status(args) => sit::cli::commands::status::run(args, &global),
        Commands::Import(args) => sit::cli::commands::import::run(args, &global),
        Commands::Bulk(cmd) => sit::cli::commands::bulk::run(cmd, &global),
        Commands::Test(cmd) => sit::cli::commands::test::run(cmd, &global),
        Commands::Set(cmd) => sit::cli::commands::set::run(cmd, &global),
        Commands::Rm(cmd) => sit::cli::commands::rm::run(cmd, &global),
        Commands::Completions(args) => sit::cli::commands::completions::run(args),
    }
}
