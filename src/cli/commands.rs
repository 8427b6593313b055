//! Command dispatch: each subcommand maps onto a domain helper or service

use std::io::{self, Read};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{CaseStyle, Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::base::{convert, Base};
use crate::domain::keyboard::{self, Variant};
use crate::domain::{ids, map, text, units};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;
use crate::util::path::relative_path;

/// Execute the CLI command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given (see `vvkit --help`)".to_string(),
        ));
    };

    if let Commands::Completion { shell } = command {
        return cmd_completion(*shell);
    }

    let settings = Settings::load(cli.config.as_deref())?;
    let container = ServiceContainer::new(settings);

    match command {
        Commands::Convert {
            number,
            to,
            to_alphabet,
            from,
            from_alphabet,
            pad,
        } => cmd_convert(
            number,
            pick_base(*to, to_alphabet.as_deref()),
            pick_base(*from, from_alphabet.as_deref()),
            *pad,
        ),
        Commands::Tree {
            file,
            json,
            diagram,
            compact,
        } => cmd_tree(&container, file, *json, *diagram, *compact),
        Commands::Case {
            style,
            text,
            dashes,
        } => cmd_case(*style, text, *dashes),
        Commands::Size { value } => {
            output::info(&units::size_to_bytes(value)?);
            Ok(())
        }
        Commands::Bytes { bytes, precision } => {
            let cfg = &container.settings.units;
            output::info(&units::bytes_to_size(
                *bytes,
                precision.unwrap_or(cfg.precision),
                cfg.threshold,
            ));
            Ok(())
        }
        Commands::Hms {
            seconds,
            days,
            precision,
        } => {
            output::info(&units::sec_to_hms(*seconds, *days, *precision));
            Ok(())
        }
        Commands::Now { offset } => {
            output::info(&units::datetime_from_now(
                *offset,
                &container.settings.datetime_format,
            )?);
            Ok(())
        }
        Commands::Translit { text, ukrainian } => {
            let variant = if *ukrainian {
                Variant::Ukrainian
            } else {
                Variant::Russian
            };
            output::info(&keyboard::translit(text, variant));
            Ok(())
        }
        Commands::Keyboard { text } => cmd_keyboard(text),
        Commands::Code {
            length,
            extra,
            letters,
        } => {
            let length = length.unwrap_or(container.settings.letter_code_length);
            output::info(&ids::gen_letter_code(
                length,
                extra.as_deref(),
                letters.as_deref(),
            ));
            Ok(())
        }
        Commands::Uid => {
            output::info(&ids::uid());
            Ok(())
        }
        Commands::Relpath { from, to } => cmd_relpath(from, to),
        Commands::Config => cmd_config(&container.settings),
        Commands::Completion { .. } => Ok(()),
    }
}

fn pick_base(radix: Option<u32>, alphabet: Option<&str>) -> Base {
    match (alphabet, radix) {
        (Some(alphabet), _) => Base::Alphabet(alphabet.to_string()),
        (None, Some(radix)) => Base::Radix(radix),
        (None, None) => Base::DECIMAL,
    }
}

#[instrument(level = "debug")]
fn cmd_convert(number: &str, to: Base, from: Base, pad: Option<usize>) -> CliResult<()> {
    let converted = convert(number, to, from, pad)?;
    output::info(&converted);
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_tree(
    container: &ServiceContainer,
    file: &Path,
    json: bool,
    diagram: bool,
    compact: bool,
) -> CliResult<()> {
    let service = &container.records;
    let records = if file == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| InfraError::io("read records from stdin", e))?;
        service.parse(&buf, "stdin")?
    } else {
        if !container.fs.is_file(file) {
            return Err(CliError::InvalidArgs(format!(
                "not a file: {}",
                file.display()
            )));
        }
        service.load(file)?
    };
    let total = records.len();

    if diagram {
        let tree = service.build(records);
        output::info(service.render_diagram(&tree).trim_end());
        return Ok(());
    }

    let leveled = service.leveled(records);
    if leveled.len() < total {
        output::warning(&format!(
            "{} of {} records are not reachable from a root and were dropped",
            total - leveled.len(),
            total
        ));
    }
    debug!("tree: {} records placed", leveled.len());

    if json && compact {
        output::info(&map::json_encode(&leveled)?);
    } else if json {
        output::info(&service.to_json(&leveled)?);
    } else {
        output::info(service.render_listing(&leveled).trim_end());
    }
    Ok(())
}

fn cmd_case(style: CaseStyle, input: &str, dashes: bool) -> CliResult<()> {
    let result = match style {
        CaseStyle::Camel => text::camel_case(input),
        CaseStyle::Studly => text::studly_caps(input),
        CaseStyle::Snake => text::under_score(input, dashes),
        CaseStyle::Ucfirst => text::ucfirst(input),
        CaseStyle::Lcfirst => text::lcfirst(input),
        CaseStyle::Ucwords => text::ucwords(input),
    };
    output::info(&result);
    Ok(())
}

fn cmd_keyboard(input: &str) -> CliResult<()> {
    let layout = keyboard::detect_layout(input);
    debug!("keyboard: detected layout {}", layout);
    let candidates = keyboard::switch_keyboard(input);
    if candidates.is_empty() {
        output::warning(&format!("nothing to re-type in {} layout", layout));
        return Ok(());
    }
    output::info(&candidates.iter().join("\n"));
    Ok(())
}

fn cmd_relpath(from: &Path, to: &Path) -> CliResult<()> {
    let rel = relative_path(from, to).map_err(|e| {
        InfraError::io(
            format!("relative path {} -> {}", from.display(), to.display()),
            e,
        )
    })?;
    output::info(&rel.display());
    Ok(())
}

fn cmd_config(settings: &Settings) -> CliResult<()> {
    if let Some(path) = global_config_path() {
        let state = if path.exists() { "" } else { " (not present)" };
        output::header(&format!("# global config: {}{}", path.display(), state));
    }
    let rendered = settings.to_toml()?;
    output::info(rendered.trim_end());
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_alphabet_and_radix_when_picking_base_then_alphabet_wins() {
        assert_eq!(
            pick_base(Some(16), Some("01")),
            Base::Alphabet("01".to_string())
        );
        assert_eq!(pick_base(Some(16), None), Base::Radix(16));
        assert_eq!(pick_base(None, None), Base::DECIMAL);
    }
}
