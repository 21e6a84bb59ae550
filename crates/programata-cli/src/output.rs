use clap::ValueEnum;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

/// Command output channel. In JSON modes every message becomes a typed JSON
/// line so the tool stays scriptable; quiet suppresses all of it (failures
/// propagate as errors and are reported regardless).
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("✓ {}", msg.as_ref()),
            _ => self.print_json(&json!({"type": "success", "message": msg.as_ref()})),
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("⚠ {}", msg.as_ref()),
            _ => self.print_json(&json!({"type": "warning", "message": msg.as_ref()})),
        }
    }

    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            _ => self.print_json(&json!({"type": "info", "message": msg.as_ref()})),
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet {
            return;
        }
        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default())
            }
            _ => println!("{}", serde_json::to_string(data).unwrap_or_default()),
        }
    }
}
