use std::io::Write;
use parley_lib::request::get_reqwest_client;
use parley_lib::storage::KeyValueStore;
use parley_lib::{ConversationManager, SettingsManager, SettingsUpdate};
use rustyline::error::ReadlineError;
use crate::error::AppError;
use crate::options::{Palette, View};
use crate::term::Term;
use crate::util::describe_settings;

const NOT_CONFIGURED: &str = "API is not configured, run `parley settings set --endpoint <url> --key <key>`.";

/// Application root, owns both managers.
pub struct App {
    palette: Palette,
    settings: SettingsManager,
    chat: ConversationManager,
}

impl App {

    /// Create app with HTTP transport and the given settings storage.
    pub fn new(palette: Palette, store: Box<dyn KeyValueStore>) -> Result<Self, AppError> {
        let settings = SettingsManager::load(store, get_reqwest_client()?);
        let chat = ConversationManager::new(get_reqwest_client()?);

        Ok(Self::with_managers(palette, settings, chat))
    }

    /// Create app from prepared managers.
    pub fn with_managers(palette: Palette, settings: SettingsManager, chat: ConversationManager) -> Self {
        App {
            palette,
            settings,
            chat,
        }
    }

    /// Run the selected view.
    pub fn run(&mut self, view: View) -> Result<(), AppError> {
        let mut out = std::io::stdout();

        match view {
            View::Chat { message } => self.run_chat(message),
            View::ShowSettings => self.show_settings(&mut out),
            View::UpdateSettings { endpoint, key } => self.update_settings(endpoint, key, &mut out),
            View::ListModels => self.list_models(&mut out),
            View::SetModel(model_id) => self.set_model(&model_id, &mut out),
        }
    }

    fn run_chat(&mut self, first_message: Option<String>) -> Result<(), AppError> {
        let mut term = Term::new(&self.palette)?;
        term.print_intro();

        if !self.settings.settings().is_configured() {
            term.print_notice(NOT_CONFIGURED);
        }

        if let Some(message) = first_message {
            self.send(&term, &message);
        }

        while let Some(input) = self.get_user_input(&mut term)? {
            match input.as_str() {
                "?" => term.print_help(),
                "/clear" => {
                    self.chat.clear_messages();
                    term.print_notice("Conversation cleared.");
                },
                "/settings" => term.print_notice(&describe_settings(self.settings.settings())),
                _ => self.send(&term, &input),
            }
        }

        Ok(())
    }

    fn send(&mut self, term: &Term, content: &str) {
        term.print_notice("...");

        match self.chat.send_message(self.settings.settings(), content) {
            Ok(reply) => term.assistant_print(&reply.content),
            Err(parley_lib::Error::Configuration(_)) => term.print_error(NOT_CONFIGURED),
            Err(err) => term.print_error(&err.to_string()),
        }
    }

    fn get_user_input(&self, term: &mut Term) -> Result<Option<String>, AppError> {
        loop {
            match term.user_input() {
                Ok(input) => {
                    let input = input.trim();
                    if !input.is_empty() {
                        return Ok(Some(input.to_owned()));
                    }
                },
                Err(AppError::Rustyline(ReadlineError::Interrupted | ReadlineError::Eof)) => return Ok(None),
                Err(err) => return Err(err),
            }
        }
    }

    fn show_settings(&self, out: &mut impl Write) -> Result<(), AppError> {
        writeln!(out, "{}", describe_settings(self.settings.settings()))?;
        Ok(())
    }

    fn update_settings(&mut self, endpoint: String, key: String, out: &mut impl Write) -> Result<(), AppError> {
        self.settings.update_settings(SettingsUpdate { api_endpoint: endpoint, api_key: key })?;
        writeln!(out, "Connection OK, settings saved.\n{}", describe_settings(self.settings.settings()))?;
        Ok(())
    }

    fn list_models(&self, out: &mut impl Write) -> Result<(), AppError> {
        let models = self.settings.list_models()?;
        let default_model = &self.settings.settings().default_model;

        if models.is_empty() {
            writeln!(out, "The endpoint did not report any models.")?;
        }

        for model in models.iter() {
            let id = model["id"].as_str().unwrap_or("<unnamed>");
            let marker = if id == default_model { "*" } else { " " };
            writeln!(out, "{marker} {id}")?;
        }

        Ok(())
    }

    fn set_model(&mut self, model_id: &str, out: &mut impl Write) -> Result<(), AppError> {
        self.settings.update_default_model(model_id)?;
        if model_id.is_empty() {
            writeln!(out, "Default model reset to the provider default.")?;
        } else {
            writeln!(out, "Default model set to {model_id}.")?;
        }
        Ok(())
    }
}
