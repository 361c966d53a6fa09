use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Link,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Link => style(text).cyan().underlined(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Renders a control label, dimmed when the control is disabled.
pub fn control(label: &str, enabled: bool) -> String {
    if enabled {
        style(label).bold().to_string()
    } else {
        style_text(label, StyleType::Subtle)
    }
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Row number shown in front of each row, used to pick a row with `open`.
pub fn row_number_cell(number: usize) -> Cell {
    Cell::new(number)
        .fg(Color::DarkGrey)
        .set_alignment(CellAlignment::Right)
}

pub fn amount_cell(text: &str) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

/// Lays out summary cards side by side, one column per card.
pub fn cards<'a>(cards: impl IntoIterator<Item = (&'a str, String)>) -> String {
    let (labels, values): (Vec<_>, Vec<_>) = cards
        .into_iter()
        .map(|(label, value)| {
            (
                Cell::new(label)
                    .add_attribute(Attribute::Bold)
                    .set_alignment(CellAlignment::Center),
                Cell::new(value)
                    .fg(Color::Green)
                    .set_alignment(CellAlignment::Center),
            )
        })
        .unzip();

    let mut table = new_styled_table();
    table.set_header(labels);
    table.add_row(values);
    table.to_string()
}

/// Creates a spinner shown while a request is in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
