use super::command::Command;
use anyhow::{anyhow, Result};
use clap::{App, AppSettings, Arg};
use log::{error, info};
use std::str::FromStr;
use std::sync::Once;
use std::time::SystemTime;
use sysinfo::System;

static LOGGER_INIT: Once = Once::new();

const ARG_LOGGING_LEVEL: &str = "LOGGING_LEVEL";

pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_LOGGING_LEVEL)
        .long("logging-level")
        .multiple(false)
        .default_value("info")
        .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
        .help("set the minimal logging level")
}

/// A structure used to handle the set of commands and to process the CLI
/// arguments against them.
///
/// The manager initializes the logger, reads the CLI arguments and executes
/// the right command. If a command returns an error, the error stack is
/// displayed and a status of 1 is returned to the system.
pub(crate) struct CliManager<'a> {
    app_name: &'a str,
    version: &'a str,
    author: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a>>>,
}

impl<'a> CliManager<'a> {
    pub fn new(app_name: &'a str, version: &'a str, author: &'a str, about: &'a str) -> Self {
        CliManager {
            app_name,
            version,
            author,
            about,
            commands: vec![],
        }
    }

    pub fn add_command(&mut self, command: Box<dyn Command<'a>>) {
        self.commands.push(command);
    }

    /// Launches the app: parses `std::env::args_os()`, executes the matching
    /// command and exits with a status of 1 on error.
    ///
    /// This function consumes the manager.
    pub fn launch(self) {
        let start_time = SystemTime::now();
        match self.parse_cli() {
            Ok(()) => info!(
                "exiting successfully after {:?}",
                start_time.elapsed().unwrap()
            ),
            Err(e) => {
                init_logger_with_level(log::LevelFilter::Info);
                error!("an error occurred: {}", e);
                e.chain()
                    .skip(1)
                    .for_each(|err| error!("caused by: {}", err));
                std::process::exit(1);
            }
        }
    }

    fn parse_cli(&self) -> Result<()> {
        let mut app = App::new(self.app_name)
            .global_setting(AppSettings::DisableVersion)
            .global_setting(AppSettings::VersionlessSubcommands)
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .version(self.version)
            .author(self.author)
            .about(self.about);
        for c in self.commands.iter() {
            app = app.subcommand(c.clap_subcommand());
        }
        let matches = match app.get_matches_from_safe(std::env::args_os()) {
            Ok(matches) => matches,
            Err(e)
                if e.kind == clap::ErrorKind::HelpDisplayed
                    || e.kind == clap::ErrorKind::VersionDisplayed =>
            {
                println!("{}", e.message);
                return Ok(());
            }
            Err(e) => return Err(anyhow!("{}", e)),
        };
        for c in self.commands.iter() {
            if let Some(matches) = matches.subcommand_matches(c.name()) {
                let log_level = matches
                    .value_of(ARG_LOGGING_LEVEL)
                    .map(|l| log::LevelFilter::from_str(l).unwrap())
                    .unwrap_or(log::LevelFilter::Info);
                init_logger_with_level(log_level);
                info!("{} {}", self.app_name, self.version);
                sys_info();
                return c.execute(matches);
            }
        }
        unreachable!()
    }
}

fn init_logger_with_level(level: log::LevelFilter) {
    LOGGER_INIT.call_once(|| {
        let colors = fern::colors::ColoredLevelConfig::new().info(fern::colors::Color::Cyan);
        fern::Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!(
                    "[{:5}] {} {}",
                    colors.color(record.level()),
                    chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                    message
                ))
            })
            .level(level)
            .chain(std::io::stderr())
            .apply()
            .unwrap_or(());
    });
}

fn sys_info() {
    info!("----------------------------------------");
    let sys = System::new_all();
    let unknown = || "[unknown]".to_string();
    info!("running on {}", System::host_name().unwrap_or_else(unknown));
    info!(
        "OS is {} {} with kernel {}",
        System::name().unwrap_or_else(unknown),
        System::os_version().unwrap_or_else(unknown),
        System::kernel_version().unwrap_or_else(unknown)
    );
    let mut cpu_kinds: Vec<&str> = sys.cpus().iter().map(|c| c.brand()).collect();
    cpu_kinds.sort_unstable();
    cpu_kinds.dedup();
    info!(
        "physical core count: {} {:?}",
        sys.physical_core_count().unwrap_or_default(),
        cpu_kinds
    );
    info!("total memory: {} MB", sys.total_memory() >> 20);
    info!("----------------------------------------");
}
