//! Output sinks for rendered text.
//!
//! Rendering only appends: statements write literal text and the display
//! form of evaluated values. Enum dispatch keeps the per-write path free of
//! vtable calls.

use std::io::Write;
use std::sync::Arc;

use jinja_value::Value;
use parking_lot::Mutex;

/// Sink that writes straight to stdout.
#[derive(Default)]
pub struct StdoutOutput;

impl StdoutOutput {
    pub fn write_str(&self, text: &str) {
        print!("{text}");
    }

    /// Stdout does not capture.
    pub fn output(&self) -> String {
        String::new()
    }

    pub fn flush(&self) {
        // Nothing useful to do with a failed stdout flush mid-render.
        let _ = std::io::stdout().flush();
    }
}

/// Sink that captures everything in memory.
pub struct BufferOutput {
    buffer: Mutex<String>,
}

impl BufferOutput {
    pub fn new() -> Self {
        BufferOutput {
            buffer: Mutex::new(String::new()),
        }
    }

    pub fn write_str(&self, text: &str) {
        self.buffer.lock().push_str(text);
    }

    /// Everything captured so far.
    pub fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    /// Drain the buffer, returning its contents.
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.buffer.lock())
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// Output stream a render writes into.
pub enum OutStream {
    Stdout(StdoutOutput),
    Buffer(BufferOutput),
    /// Discards everything.
    Silent,
}

impl OutStream {
    /// A fresh capturing stream.
    pub fn buffer() -> Self {
        OutStream::Buffer(BufferOutput::new())
    }

    pub fn write_str(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self {
            Self::Stdout(out) => out.write_str(text),
            Self::Buffer(out) => out.write_str(text),
            Self::Silent => {}
        }
    }

    /// Append the display form of `value`. `Empty` writes nothing.
    pub fn write_value(&self, value: &Value) {
        match value {
            Value::Empty => {}
            Value::Str(s) => self.write_str(s),
            _ => self.write_str(&value.to_string()),
        }
    }

    /// Captured output. Empty for streams that don't capture.
    pub fn output(&self) -> String {
        match self {
            Self::Stdout(out) => out.output(),
            Self::Buffer(out) => out.output(),
            Self::Silent => String::new(),
        }
    }

    /// Take the captured output, leaving the stream empty.
    pub fn take_output(&self) -> String {
        match self {
            Self::Buffer(out) => out.take(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        match self {
            Self::Buffer(out) => out.clear(),
            Self::Stdout(out) => out.flush(),
            Self::Silent => {}
        }
    }
}

impl Default for OutStream {
    fn default() -> Self {
        OutStream::buffer()
    }
}

/// Output stream shared between a render and its caller.
pub type SharedOutStream = Arc<OutStream>;

pub fn stdout_output() -> SharedOutStream {
    Arc::new(OutStream::Stdout(StdoutOutput))
}

pub fn buffer_output() -> SharedOutStream {
    Arc::new(OutStream::buffer())
}
