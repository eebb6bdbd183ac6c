use clap::Parser;
use miette::Result;
use emreg::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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
    init_logging(global.verbose);

    match cli.command {
        Commands::New(args) => emreg::cli::commands::new::run(args, &global),
        Commands::Validate(args) => emreg::cli::commands::validate::run(args, &global),
        Commands::Options(args) => emreg::cli::commands::options::run(args, &global),
        Commands::Completions(args) => emreg::cli::commands::completions::run(args),
    }
}

/// Log to stderr; `RUST_LOG` wins unless --verbose is given
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("emreg=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
