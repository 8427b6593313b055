use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use vvkit::cli::args::Cli;
use vvkit::cli::commands::execute_command;
use vvkit::cli::output;

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

    // config's env source logs every lookup at trace
    let noisy_modules = ["config"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let filtered_layer = fmt_layer.with_filter(filter).with_filter(module_filter);

    tracing_subscriber::registry().with(filtered_layer).init();

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
    use vvkit::util::testing;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup();
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn given_convert_args_when_parsing_then_fills_bases() {
        let cli = Cli::parse_from(["vvkit", "-dd", "convert", "255", "--to", "16"]);
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(vvkit::cli::Commands::Convert { number, to, from, .. }) => {
                assert_eq!(number, "255");
                assert_eq!(to, Some(16));
                assert_eq!(from, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn given_compact_without_json_when_parsing_then_rejected() {
        let parsed = Cli::try_parse_from(["vvkit", "tree", "records.json", "--compact"]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["vvkit", "tree", "-", "--json", "--compact"]);
        assert!(parsed.is_ok());
    }
}
