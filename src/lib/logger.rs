use colored::{ColoredString, Colorize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn tag(&self) -> ColoredString {
        match self {
            LogLevel::Debug => "DBG".bright_cyan(),
            LogLevel::Info => "INF".bright_green(),
            LogLevel::Warn => "WAR".yellow(),
            LogLevel::Error => "ERR".bright_red(),
        }
    }
}

/// A small component logger: a name, a level threshold, colored level tags.
#[derive(Debug, Clone)]
pub struct Logger {
    level: LogLevel,
    name: String,
}

impl Logger {
    pub fn new(level: LogLevel, name: impl Into<String>) -> Self {
        Logger {
            level,
            name: name.into(),
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if level >= self.level {
            eprintln!(
                "[{}] {} {}",
                level.tag(),
                format!("{}:", self.name).dimmed(),
                message
            );
        }
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Starts a multi-line key-value block, for banners.
    pub fn object<'a>(&'a self, name: &'a str) -> ObjectBuilder<'a> {
        ObjectBuilder {
            logger: self,
            name,
            fields: vec![],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ObjectBuilder<'a> {
    logger: &'a Logger,
    name: &'a str,
    fields: Vec<(&'a str, String)>,
}

impl<'a> ObjectBuilder<'a> {
    pub fn add_field(mut self, name: &'a str, value: impl ToString) -> Self {
        self.fields.push((name, value.to_string()));
        self
    }

    pub fn log(&self, level: LogLevel) {
        let mut message = format!("{} {{", self.name);
        for (name, value) in &self.fields {
            message.push_str(&format!("\n  {}: {}", name, value));
        }
        message.push_str("\n}");

        self.logger.log(level, &message);
    }
}
