//! Terminal rendering for markdown output
//!
//! Tables and headers go through termimad when color is enabled; with
//! `--no-color` the markdown is printed as is. Status lines go to stderr so
//! stdout stays parseable for `vf assign`.

use anyhow::Result;
use termimad::{
    crossterm::style::{Color, Stylize},
    MadSkin,
};
use valveflow_core::OperationStatus;

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            self.skin.print_text(markdown);
        } else {
            print!("{markdown}");
            if !markdown.ends_with('\n') {
                println!();
            }
        }
        Ok(())
    }

    pub fn render_status(&self, status: &OperationStatus) -> Result<()> {
        if self.rich_enabled {
            let color = if status.success {
                Color::Green
            } else {
                Color::Red
            };
            eprintln!("{}", status.to_string().with(color));
        } else {
            eprintln!("{status}");
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
