//! App initialization functions.

use anstyle::Style;
use clap::Arg;
use clap::ArgMatches;
use clap::Command;
use std::ffi::OsString;
use std::path::PathBuf;
use crate::error::AppError;
use crate::util::{default_settings_path, parse_colors};

/// What the app should do.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Interactive chat, optionally starting with a message.
    Chat {
        /// First user message.
        message: Option<String>,
    },
    /// Print current settings.
    ShowSettings,
    /// Validate and store a new endpoint and key.
    UpdateSettings {
        /// API base URL.
        endpoint: String,
        /// API key.
        key: String,
    },
    /// List models of the configured endpoint.
    ListModels,
    /// Store the default model.
    SetModel(String),
}

/// Message colors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    /// User message color and prompt background.
    pub user_color: (Option<[u8;3]>, Option<[u8;3]>),
    /// Assistant message color and prompt background.
    pub assistant_color: (Option<[u8;3]>, Option<[u8;3]>),
}

/// App options.
#[derive(Debug, Clone)]
pub struct Options {
    /// Settings file path.
    pub settings_path: Option<PathBuf>,
    /// Colors.
    pub palette: Palette,
    /// Selected view.
    pub view: View,
}

macro_rules! check_and_set_color_arg {
    ($arg:literal, $m:ident, $option:expr) => {
        if let Some(x) = $m.get_one::<String>($arg) {
            if let Ok(colors) = parse_colors(&x) {
                $option = colors;
            } else {
                return Err(AppError::InvalidArgError(
                    concat!($arg, " must have valid format, e.g. 'fg(255,0,123);bg(0,123,255)'.")
                ));
            }
        }
    }
}

impl Options {

    fn message_arg() -> Arg {
        Arg::new("message")
            .long("message")
            .help("First user message")
            .short('e')
            .env("PARLEY_MESSAGE")
            .required(false)
    }

    fn command() -> Command {
        let bold_underline = Style::new().underline().bold();
        let bold = Style::new().bold();

        Command::new("Parley")
            .about("Parley is a terminal chat client for hosted LLM APIs (OpenAI-compatible, Anthropic, Together).")
            .version(env!("CARGO_PKG_VERSION"))
            .arg(
                Arg::new("settings-file")
                .long("settings")
                .help("Settings file path")
                .short('s')
                .env("PARLEY_SETTINGS")
                .global(true)
                .required(false)
            ).arg(
                Self::message_arg()
            ).arg(
                Arg::new("user-color")
                .long("user-color")
                .help("User messages and prompt background colors, rgb (e.g. 'fg(255,0,123);bg(0,123,255)').")
                .env("PARLEY_USER_COLOR")
                .global(true)
                .required(false)
            ).arg(
                Arg::new("assistant-color")
                .long("assistant-color")
                .help("Assistant messages and prompt background colors, rgb (e.g. 'fg(255,0,123);bg(0,123,255)').")
                .env("PARLEY_ASSISTANT_COLOR")
                .global(true)
                .required(false)
            ).subcommand(
                Command::new("chat")
                .about("Chat with the configured model (default)")
                .arg(Self::message_arg())
            ).subcommand(
                Command::new("settings")
                .about("Show or change API settings")
                .subcommand(
                    Command::new("show")
                    .about("Print current settings (default)")
                ).subcommand(
                    Command::new("set")
                    .about("Test the connection and store API endpoint and key")
                    .arg(
                        Arg::new("endpoint")
                        .long("endpoint")
                        .help("API base URL, e.g. https://api.openai.com/v1")
                        .short('u')
                        .env("PARLEY_API_ENDPOINT")
                        .required(false)
                    ).arg(
                        Arg::new("key")
                        .long("key")
                        .help("API key")
                        .short('k')
                        .env("PARLEY_API_KEY")
                        .required(false)
                    )
                ).subcommand(
                    Command::new("models")
                    .about("List models available at the configured endpoint")
                ).subcommand(
                    Command::new("model")
                    .about("Set the default model")
                    .arg(
                        Arg::new("id")
                        .help("Model id, empty string for the provider default")
                        .required(false)
                    )
                )
            )
            .after_help(format!("{bold_underline}Example:{bold_underline:#} {bold}

    parley settings set --endpoint=https://api.openai.com/v1 --key=<your-key>
    parley settings model gpt-4o
    parley --message='Hi!'{bold:#}

Settings are validated against the endpoint and stored in the settings file
(by default in the user's configuration directory, see --settings).
The provider type is detected from the endpoint host; unknown hosts are treated as OpenAI-compatible.
Set {}=debug to see requests on stderr.", crate::logging::LOG_ENV))
    }

    fn argument_parser<T>(args: impl IntoIterator<Item = T>) -> ArgMatches where T: Into<OsString> + Clone {
        Self::command().get_matches_from(args)
    }

    // Global arguments propagate down to the innermost subcommand.
    fn leaf(m: &ArgMatches) -> &ArgMatches {
        match m.subcommand() {
            Some((_, sub)) => Self::leaf(sub),
            None => m,
        }
    }

    fn select_view(m: &ArgMatches, message: Option<String>) -> Result<View, AppError> {
        Ok(match m.subcommand() {
            Some(("settings", sm)) => match sm.subcommand() {
                Some(("set", s)) => View::UpdateSettings {
                    endpoint: s.get_one::<String>("endpoint")
                        .cloned()
                        .ok_or(AppError::MissingArgError("API endpoint is not specified."))?,
                    key: s.get_one::<String>("key")
                        .cloned()
                        .ok_or(AppError::MissingArgError("API key is not specified."))?,
                },
                Some(("models", _)) => View::ListModels,
                Some(("model", s)) => View::SetModel(
                    s.get_one::<String>("id")
                        .cloned()
                        .ok_or(AppError::MissingArgError("model id is not specified."))?
                ),
                _ => View::ShowSettings,
            },
            _ => View::Chat { message },
        })
    }

    /// Load and validate options from env and command line arguments.
    pub fn load<T>(args: impl IntoIterator<Item = T>) -> Result<Self, AppError>
        where T: Into<OsString> + Clone
    {
        let m = Self::argument_parser(args);
        let leaf = Self::leaf(&m);

        let settings_path = leaf.get_one::<String>("settings-file").map(PathBuf::from);

        let mut palette = Palette::default();
        check_and_set_color_arg!("user-color", leaf, palette.user_color);
        check_and_set_color_arg!("assistant-color", leaf, palette.assistant_color);

        let message = match m.subcommand() {
            Some(("chat", chat)) => chat.get_one::<String>("message"),
            _ => None,
        }.or(m.get_one::<String>("message")).cloned();

        let view = Self::select_view(&m, message)?;

        if let View::UpdateSettings { endpoint, .. } = &view {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(AppError::InvalidArgError("endpoint must be an http(s) URL"));
            }
        }

        Ok(Options {
            settings_path,
            palette,
            view,
        })
    }

    /// Settings file path, explicit or default.
    pub fn settings_path(&self) -> Result<PathBuf, AppError> {
        match &self.settings_path {
            Some(path) => Ok(path.clone()),
            None => default_settings_path(),
        }
    }
}
