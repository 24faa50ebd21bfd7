use ratatui::style::Color;

use super::chat::SenderType;

pub struct Theme;

impl Theme {
    // ── Base palette ────────────────────────────────────────────
    pub const BACKGROUND: Color = Color::Rgb(18, 18, 24);
    pub const SURFACE: Color = Color::Rgb(28, 28, 38);
    pub const TEXT: Color = Color::Rgb(225, 225, 235);
    pub const MUTED_TEXT: Color = Color::Rgb(100, 105, 120);

    // ── Accent colors ───────────────────────────────────────────
    pub const ACCENT: Color = Color::Rgb(80, 200, 200); // teal, primary accent
    pub const ACCENT_WARM: Color = Color::Rgb(230, 160, 60); // amber, pending work
    pub const ACCENT_PURPLE: Color = Color::Rgb(170, 130, 255); // soft purple, agent

    // ── Semantic colors ─────────────────────────────────────────
    pub const SUCCESS: Color = Color::Rgb(80, 210, 120);
    pub const WARNING: Color = Color::Rgb(230, 180, 60);
    pub const ERROR: Color = Color::Rgb(230, 80, 80);
    pub const INFO: Color = Color::Rgb(80, 180, 220);

    // ── UI chrome ───────────────────────────────────────────────
    pub const HEADER_BG: Color = Color::Rgb(24, 24, 32);
    pub const FOOTER_BG: Color = Color::Rgb(24, 24, 32);
    pub const PANEL_BORDER: Color = Color::Rgb(50, 50, 65);
    pub const ACTIVE_BORDER: Color = Color::Rgb(80, 200, 200); // = ACCENT
    pub const SELECTION_BG: Color = Color::Rgb(40, 55, 75);

    // ── Task status ─────────────────────────────────────────────
    pub const TASK_PENDING: Color = Color::Rgb(230, 160, 60); // = ACCENT_WARM
    pub const TASK_COMPLETED: Color = Color::Rgb(80, 210, 120); // = SUCCESS

    // ── Chat ────────────────────────────────────────────────────
    pub const SENDER_USER: Color = Color::Rgb(80, 180, 220); // = INFO
    pub const SENDER_AGENT: Color = Color::Rgb(170, 130, 255); // = ACCENT_PURPLE

    pub fn task_color(completed: bool) -> Color {
        if completed {
            Self::TASK_COMPLETED
        } else {
            Self::TASK_PENDING
        }
    }

    pub fn sender_color(sender: SenderType) -> Color {
        match sender {
            SenderType::User => Self::SENDER_USER,
            SenderType::Agent => Self::SENDER_AGENT,
        }
    }
}
