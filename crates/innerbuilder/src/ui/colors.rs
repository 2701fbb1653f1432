use std::io::IsTerminal;

use clap::{
  ValueEnum,
  builder::styling::{AnsiColor, Color as ClapColor, RgbColor, Style, Styles},
};
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

use innerbuilder::generator::MergeAction;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

/// Terminal colors for one theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
  timestamp: Color,
  primary: Color,
  accent: Color,
  label: Color,
  value: Color,
  added: Color,
  replaced: Color,
  muted: Color,
}

const DARK: Palette = Palette {
  timestamp: Color::Rgb { r: 118, g: 166, b: 166 },
  primary: Color::Rgb { r: 191, g: 126, b: 4 },
  accent: Color::Rgb { r: 166, g: 84, b: 55 },
  label: Color::Rgb { r: 217, g: 164, b: 4 },
  value: Color::Rgb { r: 242, g: 211, b: 56 },
  added: Color::Rgb { r: 118, g: 166, b: 118 },
  replaced: Color::Rgb { r: 118, g: 166, b: 166 },
  muted: Color::DarkGrey,
};

const LIGHT: Palette = Palette {
  timestamp: Color::Rgb { r: 92, g: 62, b: 38 },
  primary: Color::Rgb { r: 70, g: 42, b: 25 },
  accent: Color::Rgb { r: 211, g: 99, b: 70 },
  label: Color::Rgb { r: 176, g: 103, b: 66 },
  value: Color::Rgb { r: 199, g: 146, b: 76 },
  added: Color::Rgb { r: 34, g: 142, b: 90 },
  replaced: Color::Rgb { r: 40, g: 111, b: 170 },
  muted: Color::Grey,
};

pub struct Colors {
  palette: Option<Palette>,
}

pub trait IntoComfyColor {
  fn into(self) -> ComfyColor;
}

impl IntoComfyColor for Color {
  fn into(self) -> ComfyColor {
    match self {
      Color::Reset => ComfyColor::Reset,
      Color::Black => ComfyColor::Black,
      Color::DarkGrey => ComfyColor::DarkGrey,
      Color::Red => ComfyColor::Red,
      Color::DarkRed => ComfyColor::DarkRed,
      Color::Green => ComfyColor::Green,
      Color::DarkGreen => ComfyColor::DarkGreen,
      Color::Yellow => ComfyColor::Yellow,
      Color::DarkYellow => ComfyColor::DarkYellow,
      Color::Blue => ComfyColor::Blue,
      Color::DarkBlue => ComfyColor::DarkBlue,
      Color::Magenta => ComfyColor::Magenta,
      Color::DarkMagenta => ComfyColor::DarkMagenta,
      Color::Cyan => ComfyColor::Cyan,
      Color::DarkCyan => ComfyColor::DarkCyan,
      Color::White => ComfyColor::White,
      Color::Grey => ComfyColor::Grey,
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(val) => ComfyColor::AnsiValue(val),
    }
  }
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    let palette = match theme {
      Theme::Dark => DARK,
      Theme::Light => LIGHT,
    };
    Self {
      palette: if enabled { Some(palette) } else { None },
    }
  }

  fn pick(&self, color: fn(&Palette) -> Color) -> Color {
    match &self.palette {
      Some(palette) => color(palette),
      None => Color::Reset,
    }
  }

  pub fn timestamp(&self) -> Color {
    self.pick(|palette| palette.timestamp)
  }

  pub fn primary(&self) -> Color {
    self.pick(|palette| palette.primary)
  }

  pub fn accent(&self) -> Color {
    self.pick(|palette| palette.accent)
  }

  pub fn label(&self) -> Color {
    self.pick(|palette| palette.label)
  }

  pub fn value(&self) -> Color {
    self.pick(|palette| palette.value)
  }

  pub fn muted(&self) -> Color {
    self.pick(|palette| palette.muted)
  }

  /// Color of a member change line in the generation summary.
  pub fn action(&self, action: MergeAction) -> Color {
    match action {
      MergeAction::Added => self.pick(|palette| palette.added),
      MergeAction::Replaced => self.pick(|palette| palette.replaced),
      MergeAction::Unchanged => self.muted(),
      MergeAction::Removed => self.accent(),
    }
  }

  const fn to_clap(color: Color) -> Option<ClapColor> {
    match color {
      Color::Rgb { r, g, b } => Some(ClapColor::Rgb(RgbColor(r, g, b))),
      Color::DarkGrey | Color::Grey => Some(ClapColor::Ansi(AnsiColor::BrightBlack)),
      _ => None,
    }
  }

  pub const fn clap_styles() -> Styles {
    Styles::styled()
      .header(Style::new().bold().underline().fg_color(Self::to_clap(DARK.label)))
      .usage(Style::new().bold().fg_color(Self::to_clap(DARK.label)))
      .literal(Style::new().fg_color(Self::to_clap(DARK.added)))
      .placeholder(Style::new().fg_color(Self::to_clap(DARK.timestamp)))
      .error(Style::new().bold().fg_color(Self::to_clap(DARK.accent)))
      .valid(Style::new().fg_color(Self::to_clap(DARK.added)))
      .invalid(Style::new().bold().fg_color(Self::to_clap(DARK.accent)))
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => detect_terminal_theme(),
  }
}

/// Reads `COLORFGBG` (`fg;bg`); a background index of 8 or more is a light terminal.
fn detect_terminal_theme() -> Theme {
  if let Ok(colorfgbg) = std::env::var("COLORFGBG")
    && let Some(bg) = colorfgbg.split(';').next_back()
    && let Ok(bg_num) = bg.parse::<u8>()
  {
    return if bg_num >= 8 { Theme::Light } else { Theme::Dark };
  }

  Theme::Dark
}
