//! Knobs for one rendering pass.

/// Which optional sections to emit and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Path written into the `` `include `` directive.
    pub include_path: String,
    /// Emit the exhaustive stimulus block. Ignored for unsupported
    /// interfaces.
    pub truth_table: bool,
    /// Emit the `$monitor` block.
    pub monitor: bool,
    /// Delay before each stimulus step, in simulation time units.
    pub delay: u32,
    /// Comment line at the top of the file.
    pub banner: String,
    /// Largest driven-port count that still gets a truth table.
    pub max_truth_table_inputs: u32,
}

impl RenderOptions {
    /// Options with both optional sections off, a 10-unit delay and a
    /// 16-input truth-table limit.
    pub fn new(include_path: impl Into<String>, banner: impl Into<String>) -> Self {
        Self {
            include_path: include_path.into(),
            truth_table: false,
            monitor: false,
            delay: 10,
            banner: banner.into(),
            max_truth_table_inputs: 16,
        }
    }

    /// Sets whether the truth table is emitted.
    pub fn with_truth_table(mut self, on: bool) -> Self {
        self.truth_table = on;
        self
    }

    /// Sets whether the monitor is emitted.
    pub fn with_monitor(mut self, on: bool) -> Self {
        self.monitor = on;
        self
    }

    /// Sets the stimulus step delay.
    pub fn with_delay(mut self, delay: u32) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the truth-table input limit.
    pub fn with_max_truth_table_inputs(mut self, max: u32) -> Self {
        self.max_truth_table_inputs = max;
        self
    }
}
