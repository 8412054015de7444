use std::borrow::Cow;

use anstyle::Style;
use crate::{error::AppError, options::Palette, style::Styles};
use rustyline::{config::BellStyle, highlight::{CmdKind, Highlighter}, history::MemHistory, Completer, CompletionType, EditMode, Editor, Helper, Hinter, Validator};

const LOGO: &str = r"
    ____   ___    ____   __    ______ __  __
   / __ \ /   |  / __ \ / /   / ____/ \ \/ /
  / /_/ // /| | / /_/ // /   / __/     \  /
 / ____// ___ |/ _, _// /___/ /___     / /
/_/    /_/  |_/_/ |_|/_____/_____/    /_/   ";

const INSTRUCTIONS: &str = "For help use ?, to exit use Ctrl+C";

const HELP: &str = "You are in a dialogue with the configured model, please enter your message.
The whole conversation is sent with every message.
  /clear     start a new conversation
  /settings  show the API settings
API settings are changed with `parley settings set`.";

/// Terminal stuff.
pub struct Term {
    styles: Styles,
    dumb: bool,
    editor: Editor<RlineHelper, MemHistory>,
}

// Badge like ` USER ` followed by an arrow in the badge color.
fn badge(label: &str, style: Style, arrow: Style) -> String {
    format!("{style} {label} {style:#}{arrow}\u{e0b0} {arrow:#}")
}

impl Term {
    /// New instance.
    pub fn new(palette: &Palette) -> Result<Self, AppError> {
        let rline_config = rustyline::Config::builder()
            .history_ignore_space(true)
            .auto_add_history(true)
            .bell_style(BellStyle::None)
            .check_cursor_position(true)
            .completion_type(CompletionType::List)
            .edit_mode(EditMode::Emacs)
            .build();

        let mut editor: Editor<RlineHelper, MemHistory> = Editor::with_config(rline_config)?;
        editor.set_helper(Some(RlineHelper { colored_prompt: String::new() }));

        Ok(Term {
            styles: Styles::new(palette),
            dumb: Ok("dumb") == std::env::var("TERM").as_deref(),
            editor,
        })
    }

    fn paint(&self, style: Style, s: &str) -> String {
        if self.dumb {
            s.to_owned()
        } else {
            format!("{style}{s}{style:#}")
        }
    }

    /// Get input from user.
    pub fn user_input(&mut self) -> Result<String, AppError> {
        if self.dumb {
            return Ok(self.editor.readline("USER> ")?);
        }

        let prompt = badge("USER", self.styles.user_prompt, self.styles.user_prompt_arrow);
        if let Some(helper) = self.editor.helper_mut() {
            helper.colored_prompt = format!("{}{}", prompt, self.styles.user_text);
        }

        let line = self.editor.readline(" USER > ");
        print!("{:#}", self.styles.user_text);
        Ok(line?)
    }

    /// Print as assistant.
    pub fn assistant_print(&self, s: &str) {
        let prompt = if self.dumb {
            "ASSISTANT> ".to_owned()
        } else {
            badge("ASSISTANT", self.styles.assistant_prompt, self.styles.assistant_prompt_arrow)
        };
        println!("{}{}", prompt, self.paint(self.styles.assistant_text, s));
    }

    /// Print status line.
    pub fn print_notice(&self, s: &str) {
        println!("{}", self.paint(self.styles.notice_text, s));
    }

    /// Print error line.
    pub fn print_error(&self, s: &str) {
        println!("{}", self.paint(self.styles.error_text, &format!("ERROR: {s}")));
    }

    /// Print logo and instructions.
    pub fn print_intro(&self) {
        let intro = format!("{}\n (ver. {})\n\n{}", LOGO, env!("CARGO_PKG_VERSION"), INSTRUCTIONS);
        println!("{}", self.paint(self.styles.assistant_text, &intro));
    }

    /// Print help information.
    pub fn print_help(&self) {
        println!("{}", self.paint(self.styles.assistant_text, HELP));
    }
}


#[derive(Helper, Validator, Hinter, Completer)]
struct RlineHelper {
    colored_prompt: String,
}

impl Highlighter for RlineHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        let _ = pos;
        Cow::Borrowed(line)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Borrowed(&self.colored_prompt)
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        let _ = completion;
        Cow::Borrowed(candidate)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: CmdKind) -> bool {
        let _ = (line, pos, kind);
        false
    }
}
