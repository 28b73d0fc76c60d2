use super::cli_manager::logging_level_cli_arg;
use super::{command::Command, common};
use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;
use std::fs;
use std::io::Write;
use zinco::directives::BufferedEmitter;
use zinco::io::FznReader;
use zinco::translator::Translator;

const CMD_NAME: &str = "translate";

const ARG_OUT: &str = "ARG_OUT";

pub(crate) struct TranslateCommand;

impl TranslateCommand {
    pub(crate) fn new() -> Self {
        TranslateCommand
    }
}

impl<'a> Command<'a> for TranslateCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Translates a constraint model into solver directives")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(
                Arg::with_name(ARG_OUT)
                    .short("o")
                    .long("output")
                    .empty_values(false)
                    .multiple(false)
                    .help("the output file for the directives (defaults to the standard output)")
                    .required(false),
            )
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file = arg_matches.value_of(common::ARG_INPUT).unwrap();
        let model = common::read_file_path(file, &mut FznReader::default())?;
        let translator = Translator::new();
        let mut emitter = BufferedEmitter::new();
        translator
            .translate(&model, &mut emitter)
            .context("while translating the model")?;
        info!("emitted {} directive(s)", emitter.n_directives());
        match arg_matches.value_of(ARG_OUT) {
            Some(path) => {
                let context = || format!(r#"while writing the directives to "{}""#, path);
                fs::write(path, emitter.output()).with_context(context)?;
                info!(r#"directives written to "{}""#, path);
            }
            None => {
                let mut stdout = std::io::stdout();
                let context = "while writing the directives to the standard output";
                stdout
                    .write_all(emitter.output().as_bytes())
                    .context(context)?;
                stdout.flush().context(context)?;
            }
        }
        Ok(())
    }
}
