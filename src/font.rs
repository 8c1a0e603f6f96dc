//! Typeface selection for on-screen text.
//!
//! The game speaks Chinese when the terminal can show it. A terminal does not
//! expose its font list, so the glyph encodings named by the locale stand in
//! for the installed fonts. Anything unrecognised falls back to plain ASCII
//! labels; this is cosmetic and never fails the game.

/// Locale encodings that carry CJK glyphs, most preferred first
pub const PREFERRED_FONTS: &[&str] = &["UTF-8", "UTF8", "GB18030", "GBK"];

/// Locale variables in the order the C library consults them
const LOCALE_VARS: &[&str] = &["LC_ALL", "LC_CTYPE", "LANG"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Typeface {
    /// A preferred font was found; full UTF-8 text is safe
    Unicode,
    /// Renderer default, ASCII only
    Default,
}

/// Returns the first preferred name that appears (case-insensitively)
/// inside any of the available names
pub fn select_font<'a>(preferred: &[&'a str], available: &[String]) -> Option<&'a str> {
    preferred.iter().copied().find(|font| {
        let wanted = font.to_lowercase();
        available
            .iter()
            .any(|name| name.to_lowercase().contains(&wanted))
    })
}

/// Picks a typeface from locale variables read through `lookup`
pub fn detect_typeface(lookup: impl Fn(&str) -> Option<String>) -> Typeface {
    let available: Vec<String> = LOCALE_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .filter(|value| !value.is_empty())
        .collect();

    match select_font(PREFERRED_FONTS, &available) {
        Some(font) => {
            tracing::info!(font, "using unicode typeface");
            Typeface::Unicode
        }
        None => {
            tracing::warn!(?available, "no preferred typeface found, falling back to default");
            Typeface::Default
        }
    }
}

/// Picks a typeface from the process environment
pub fn detect_from_env() -> Typeface {
    detect_typeface(|var| std::env::var(var).ok())
}

/// Every piece of text the game draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub caption: &'static str,
    pub score: &'static str,
    pub game_over: &'static str,
    pub final_score: &'static str,
    pub restart_hint: &'static str,
    pub controls: &'static str,
}

impl Labels {
    pub fn for_typeface(typeface: Typeface) -> Self {
        match typeface {
            Typeface::Unicode => Self {
                caption: "太空射击游戏",
                score: "分数: ",
                game_over: "游戏结束!",
                final_score: "最终得分: ",
                restart_hint: "按R键重新开始，按ESC退出",
                controls: "[←/→: 移动] [空格: 射击] [Q: 退出]",
            },
            Typeface::Default => Self {
                caption: "Space Shooter",
                score: "Score: ",
                game_over: "GAME OVER!",
                final_score: "Final Score: ",
                restart_hint: "Press R to restart, ESC to quit",
                controls: "[Left/Right: Move] [Space: Fire] [Q: Quit]",
            },
        }
    }
}
