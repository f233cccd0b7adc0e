use crate::server;
use crate::summary::{run_summary, SummaryArgs};
use clap::{Args, Parser, Subcommand};
use cpa_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CPA Intake",
    about = "Serve the prospective client interest form or print a summary from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Write an interest summary PDF for answers taken over the phone or in person
    Summary(SummaryArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Summary(args) => run_summary(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["cpa-intake-web"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn summary_flags_parse_into_typed_answers() {
        let cli = Cli::try_parse_from([
            "cpa-intake-web",
            "summary",
            "--situation",
            "business_taxes",
            "--timeline",
            "gathering_information",
            "--complexity",
            "2",
            "--contact",
            "video_call",
            "--date",
            "2026-10-19",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Summary(args)) => {
                assert_eq!(args.complexity.level(), 2);
                assert!(args.email.is_none());
            }
            other => panic!("expected summary command, got {other:?}"),
        }
    }

    #[test]
    fn summary_rejects_out_of_range_complexity() {
        let result = Cli::try_parse_from([
            "cpa-intake-web",
            "summary",
            "--situation",
            "business_taxes",
            "--timeline",
            "immediately",
            "--complexity",
            "9",
            "--contact",
            "email",
        ]);
        assert!(result.is_err());
    }
}
