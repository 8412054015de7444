use std::path::PathBuf;
use parley_lib::Settings;
use crate::AppError;

/// Default location of the settings file.
pub fn default_settings_path() -> Result<PathBuf, AppError> {
    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or(AppError::Error("can't determine the configuration directory, use --settings".to_owned()))?;
    path.push("parley");
    path.push("settings.toml");
    Ok(path)
}

/// Hide most of the API key.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.is_empty() {
        String::new()
    } else if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..3].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

/// Human-readable settings summary.
pub fn describe_settings(settings: &Settings) -> String {
    fn or_unset(s: &str) -> &str {
        if s.is_empty() { "<not set>" } else { s }
    }

    let key = mask_key(&settings.api_key);

    format!("endpoint:      {}\nkey:           {}\nprovider:      {}\ndefault model: {}",
        or_unset(&settings.api_endpoint),
        or_unset(&key),
        settings.api_type,
        or_unset(&settings.default_model),
    )
}

/// Parse foreground and background colors from string, e.g. `fg(255,0,123);bg(0,123,255)`.
pub fn parse_colors(s: &str) -> Result<(Option<[u8;3]>, Option<[u8;3]>), AppError> {
    let mut colors = (None, None);

    for part in s.trim().trim_matches(['\'', '"']).split(';') {
        let (name, rgb) = part.split_once('(').ok_or(AppError::ColorParseError)?;
        let color = parse_color(&format!("({rgb}"))?;

        match name.trim() {
            "fg" => colors.0 = Some(color),
            "bg" => colors.1 = Some(color),
            _ => return Err(AppError::ColorParseError),
        }
    }

    Ok(colors)
}

fn parse_color(s: &str) -> Result<[u8;3], AppError> {
    let inner = s.trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or(AppError::ColorParseError)?;

    let channels = inner
        .split(',')
        .map(|c| c.trim().parse::<u8>().map_err(|_| AppError::ColorParseError))
        .collect::<Result<Vec<u8>, AppError>>()?;

    <[u8;3]>::try_from(channels).map_err(|_| AppError::ColorParseError)
}
