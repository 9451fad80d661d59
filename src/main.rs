use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use value2md::cli::args::Cli;
use value2md::cli::commands::execute_command;
use value2md::cli::output;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.debug);

    if let Err(e) = execute_command(&cli) {
        output::error(&e);
        std::process::exit(e.exit_code());
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        }
    };

    // Formatted output directed to stderr; stdout carries the document
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(filter))
        .init();

    match filter {
        LevelFilter::INFO => tracing::info!("Debug mode: info"),
        LevelFilter::DEBUG => tracing::debug!("Debug mode: debug"),
        LevelFilter::TRACE => tracing::debug!("Debug mode: trace"),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use value2md::util::testing;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        testing::init_test_setup();
        Cli::command().debug_assert();
    }

    #[test]
    fn given_convert_args_when_parsing_then_collects_tags() {
        let cli = Cli::try_parse_from([
            "value2md", "-dd", "convert", "data.yaml", "-t", "title=h1", "-t", "body=p", "-l",
            "3",
        ])
        .unwrap();

        assert_eq!(cli.debug, 2);
        match cli.command {
            value2md::cli::Commands::Convert(args) => {
                assert_eq!(args.tags, vec!["title=h1", "body=p"]);
                assert_eq!(args.title_level, Some(3));
                assert_eq!(args.input.unwrap().to_string_lossy(), "data.yaml");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_unknown_format_when_parsing_then_rejected() {
        let result = Cli::try_parse_from(["value2md", "convert", "-f", "xml"]);
        assert!(result.is_err());
    }
}
