use autofill_cli::commands::{AutofillArgs, UsageArgs, run_autofill, run_usage};
use clap::{Parser, Subcommand};
use miette::Result as MietteResult;

#[derive(Parser)]
#[command(name = "translation")]
#[command(about = "Fill missing translation catalog entries with DeepL")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More output (-v lists every translated key, -vv adds debug logs)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Deterministic output for end-to-end tests
    #[arg(long, hide = true, global = true)]
    e2e: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate keys missing from target locale catalogs
    Autofill(AutofillArgs),

    /// Show the DeepL character quota
    Usage(UsageArgs),
}

fn main() -> MietteResult<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .color(true)
                .build(),
        )
    }))
    .ok();

    let cli = Cli::parse();

    autofill_cli::utils::ui::set_e2e_mode(cli.e2e);
    autofill_cli::utils::ui::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Autofill(args) => run_autofill(args, cli.verbose > 0),
        Commands::Usage(args) => run_usage(args),
    };

    result.map_err(miette::Report::new)
}
