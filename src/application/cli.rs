use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::application::ui::session_help_text;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendName;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn arg_backend() -> Arg {
    return Arg::new(ConfigKey::Backend.to_string())
        .short('b')
        .long(ConfigKey::Backend.to_string())
        .env("PENPAL_BACKEND")
        .num_args(1)
        .help(format!(
            "The backend hosting the language model. [default: {}]",
            Config::default(ConfigKey::Backend)
        ))
        .value_parser(PossibleValuesParser::new(BackendName::VARIANTS));
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("PENPAL_MODEL")
        .num_args(1)
        .help("The model to request on the backend. Defaults to a per-backend model if not set.");
}

fn arg_request_timeout() -> Arg {
    return Arg::new(ConfigKey::RequestTimeout.to_string())
        .long(ConfigKey::RequestTimeout.to_string())
        .env("PENPAL_REQUEST_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before a hint or reflection request gives up and falls back. [default: {}]",
            Config::default(ConfigKey::RequestTimeout)
        ));
}

pub fn build() -> Command {
    let commands_text = session_help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("SESSION {line}")).underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("penpal")
        .about(about)
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .arg(arg_backend())
        .arg(arg_model())
        .arg(arg_request_timeout())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("PENPAL_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiURL.to_string())
                .long(ConfigKey::GeminiURL.to_string())
                .env("PENPAL_GEMINI_URL")
                .num_args(1)
                .help(format!("Gemini API URL when using the Gemini backend. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::GeminiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiToken.to_string())
                .long(ConfigKey::GeminiToken.to_string())
                .env("PENPAL_GEMINI_TOKEN")
                .num_args(1)
                .help("Gemini API token when using the Gemini backend.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenaiURL.to_string())
                .long(ConfigKey::OpenaiURL.to_string())
                .env("PENPAL_OPENAI_URL")
                .num_args(1)
                .help(format!("OpenAI API URL when using the OpenAI backend. Can be swapped to a compatible proxy. [default: {}]", Config::default(ConfigKey::OpenaiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::OpenaiToken.to_string())
                .long(ConfigKey::OpenaiToken.to_string())
                .env("PENPAL_OPENAI_TOKEN")
                .num_args(1)
                .help("OpenAI API token when using the OpenAI backend.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Username.to_string())
                .short('u')
                .long(ConfigKey::Username.to_string())
                .env("PENPAL_USERNAME")
                .num_args(1)
                .help("The student name displayed in the transcript.")
                .global(true),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
