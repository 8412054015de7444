//! Terminal styles.
use anstyle::Color;
use anstyle::RgbColor;
use anstyle::Style;
use crate::options::Palette;

/// Styles.
pub struct Styles {
    /// User prompt style.
    pub user_prompt: Style,
    /// User prompt arrow style.
    pub user_prompt_arrow: Style,
    /// User message style.
    pub user_text: Style,
    /// Assistant prompt style.
    pub assistant_prompt: Style,
    /// Assistant prompt arrow style.
    pub assistant_prompt_arrow: Style,
    /// Assistant message style.
    pub assistant_text: Style,
    /// Status lines.
    pub notice_text: Style,
    /// Error lines.
    pub error_text: Style,
}

fn rgb([r, g, b]: [u8;3]) -> Color {
    Color::Rgb(RgbColor(r, g, b))
}

impl Styles {

    /// Load styles.
    pub fn new(palette: &Palette) -> Self {
        let (fg_user, bg_user) = palette.user_color;
        let (fg_assistant, bg_assistant) = palette.assistant_color;

        let fg_user_color = rgb(fg_user.unwrap_or([128, 64, 64]));
        let bg_user_color = rgb(bg_user.unwrap_or([128, 0, 0]));
        let fg_assistant_color = rgb(fg_assistant.unwrap_or([64, 128, 64]));
        let bg_assistant_color = rgb(bg_assistant.unwrap_or([0, 128, 0]));

        let white = rgb([255, 255, 255]);

        Self {
            user_prompt: Style::new().bold().bg_color(Some(bg_user_color)).fg_color(Some(white)),
            user_prompt_arrow: Style::new().bold().fg_color(Some(bg_user_color)),
            user_text: Style::new().fg_color(Some(fg_user_color)),
            assistant_prompt: Style::new().bold().bg_color(Some(bg_assistant_color)).fg_color(Some(white)),
            assistant_prompt_arrow: Style::new().bold().fg_color(Some(bg_assistant_color)),
            assistant_text: Style::new().fg_color(Some(fg_assistant_color)),
            notice_text: Style::new().dimmed(),
            error_text: Style::new().bold().fg_color(Some(rgb([200, 40, 40]))),
        }
    }
}
