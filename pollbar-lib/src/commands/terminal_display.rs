use crate::Result;
use crate::poller::DisplaySink;
use core::fmt::{Debug, Formatter};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ohno::IntoAppError;
use owo_colors::OwoColorize;
use std::io::Write;

/// Redraw rate for the bar while it is visible.
const REFRESH_HZ: u8 = 10;

const BAR_LENGTH: u64 = 100;
const BAR_PREFIX: &str = "Progress";

const TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {msg}";
const TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {msg}";

/// Terminal rendering of the poller's display regions.
///
/// The container is an `indicatif` bar on stderr with the label as its message.
/// The success panel is a single line written to `success_out` once the task completes.
pub struct TerminalDisplay<W: Write> {
    bar: ProgressBar,
    success_out: W,
    success_message: String,
    use_colors: bool,
    draws: bool,
    container_visible: bool,
}

impl<W: Write> TerminalDisplay<W> {
    /// Create a display that draws its bar on stderr while the container is visible.
    ///
    /// When `use_colors` is false, bar chrome and the success line are rendered without ANSI styling.
    pub fn new(success_out: W, success_message: impl Into<String>, use_colors: bool) -> Result<Self> {
        Self::build(success_out, success_message.into(), use_colors, true)
    }

    /// Create a display whose bar is never drawn; only the success line is written.
    pub fn headless(success_out: W, success_message: impl Into<String>) -> Result<Self> {
        Self::build(success_out, success_message.into(), false, false)
    }

    fn build(success_out: W, success_message: String, use_colors: bool, draws: bool) -> Result<Self> {
        let template = if use_colors { TEMPLATE } else { TEMPLATE_NO_COLOR };
        let style = ProgressStyle::default_bar()
            .template(template)
            .into_app_err("creating progress bar style")?
            .progress_chars("=> ");

        let bar = ProgressBar::with_draw_target(Some(BAR_LENGTH), ProgressDrawTarget::hidden());
        bar.set_style(style);
        bar.set_prefix(BAR_PREFIX);

        Ok(Self {
            bar,
            success_out,
            success_message,
            use_colors,
            draws,
            container_visible: false,
        })
    }

    #[must_use]
    pub const fn is_container_visible(&self) -> bool {
        self.container_visible
    }

    /// Leave the bar on screen exactly as it was last drawn.
    ///
    /// Used when polling stalls: the display keeps the last known progress.
    pub fn freeze(&self) {
        if self.container_visible {
            self.bar.abandon();
        }
    }

    /// Hand back the success output stream.
    pub fn into_inner(self) -> W {
        self.success_out
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn set_container_visible(&mut self, visible: bool) {
        if visible == self.container_visible {
            return;
        }

        self.container_visible = visible;
        if visible {
            if self.draws {
                self.bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(REFRESH_HZ));
            }
            self.bar.tick();
        } else {
            self.bar.finish_and_clear();
            self.bar.set_draw_target(ProgressDrawTarget::hidden());
        }
    }

    fn set_bar_percent(&mut self, percent: f64) {
        self.bar.set_position(bar_position(percent));
    }

    fn set_label_text(&mut self, text: &str) {
        self.bar.set_message(text.to_string());
    }

    fn set_success_visible(&mut self, visible: bool) {
        // a line already written to the terminal cannot be taken back
        if !visible {
            return;
        }

        let line = if self.use_colors {
            format!("{} {}", "✔".green().bold(), self.success_message.green())
        } else {
            format!("✔ {}", self.success_message)
        };

        let out = &mut self.success_out;
        self.bar.suspend(|| {
            let _ = writeln!(out, "{line}");
            let _ = out.flush();
        });
    }
}

/// Map a raw percentage onto the bar's `0..=100` positions.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "value is clamped to 0..=100 first")]
fn bar_position(percent: f64) -> u64 {
    percent.clamp(0.0, 100.0).round() as u64
}

impl<W: Write> Debug for TerminalDisplay<W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TerminalDisplay")
            .field("bar", &self.bar)
            .field("success_out", &"<writer>")
            .field("success_message", &self.success_message)
            .field("use_colors", &self.use_colors)
            .field("draws", &self.draws)
            .field("container_visible", &self.container_visible)
            .finish()
    }
}
