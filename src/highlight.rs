use inksac::prelude::*;

use crate::core::commands::Registry;

#[derive(Debug, Clone, Copy)]
pub struct MessageStyler {
    color_support: ColorSupport,
}

impl Default for MessageStyler {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageStyler {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn highlight_command(&self, input: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return input.to_string();
        }

        let mut parts: Vec<String> = input.split_whitespace().map(String::from).collect();
        if parts.is_empty() {
            return input.to_string();
        }

        // Only registered names light up; anything else stays plain so the
        // user can see a typo before submitting the line.
        if Registry::new().contains(&parts[0]) {
            let command_style = Style::builder()
                .foreground(Color::Cyan)
                .bold()
                .build();
            parts[0] = parts[0].clone().style(command_style).to_string();
        }

        parts.join(" ")
    }

    pub fn error(&self, message: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return message.to_string();
        }

        let error_style = Style::builder()
            .foreground(Color::Red)
            .bold()
            .build();

        message.style(error_style).to_string()
    }

    pub fn success(&self, message: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return message.to_string();
        }

        let success_style = Style::builder()
            .foreground(Color::Green)
            .build();

        message.style(success_style).to_string()
    }

    pub fn hint(&self, message: &str) -> String {
        if matches!(self.color_support, ColorSupport::NoColor) {
            return message.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        message.style(hint_style).to_string()
    }
}
