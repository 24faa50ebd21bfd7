pub mod filter_bar;
pub mod footer;
pub mod format;
pub mod header;
pub mod help_overlay;
pub mod message_list;
pub mod notification_popup;
pub mod popup;
pub mod profile_form;
pub mod task_form;
pub mod task_list;

pub use filter_bar::render_filter_bar;
pub use footer::render_footer;
pub use header::render_header;
pub use help_overlay::render_help_overlay;
pub use message_list::{render_chat_input, render_message_list};
pub use notification_popup::render_notification_popup;
pub use popup::{centered_rect, render_confirm};
pub use profile_form::render_profile_form;
pub use task_form::render_task_form;
pub use task_list::render_task_list;

/// Flatten a test buffer into newline-separated rows.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    (0..buffer.area.height)
        .map(|y| {
            (0..buffer.area.width)
                .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
                .collect::<String>()
        })
        .collect::<Vec<String>>()
        .join("\n")
}
