/// The presentation surface the poller writes to.
///
/// The poller never reads these regions back; implementations own whatever
/// state they need to render them.
pub trait DisplaySink {
    /// Show or hide the container holding the bar and its label.
    fn set_container_visible(&mut self, visible: bool);

    /// Set the bar fill, in percent.
    ///
    /// The value is passed through unmodified and may fall outside `0..=100`.
    fn set_bar_percent(&mut self, percent: f64);

    /// Set the text shown alongside the bar.
    fn set_label_text(&mut self, text: &str);

    /// Show or hide the panel announcing successful completion.
    fn set_success_visible(&mut self, visible: bool);
}
