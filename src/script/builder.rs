// src/script/builder.rs

//! Line-oriented shell statement builder
//!
//! Stages append statements through [`ScriptBuilder`] instead of formatting
//! one large string, so block structure and indentation stay balanced and
//! each stage can be rendered on its own in tests.
//!
//! Text passed to the builder is emitted verbatim. Literal values that come
//! from user input must go through [`escape`] or [`quote`] first.

/// Spaces per nesting level
const INDENT: &str = "  ";

/// Escape a value for use inside a double-quoted shell string.
///
/// Backslash, double quote, dollar and backtick are escaped. Carriage
/// returns and newlines become spaces so a value can never break a line.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '"' | '$' | '`' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\r' | '\n' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape a value and wrap it in double quotes
pub fn quote(value: &str) -> String {
    format!("\"{}\"", escape(value))
}

/// Accumulates shell statements with block-aware indentation
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    lines: Vec<String>,
    depth: usize,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw statement at the current indentation
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines
                .push(format!("{}{}", INDENT.repeat(self.depth), text));
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn comment(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref().replace(['\r', '\n'], " ");
        self.line(format!("# {}", text))
    }

    /// `echo "<message>"`; the message may reference shell variables
    pub fn echo(&mut self, message: impl AsRef<str>) -> &mut Self {
        self.line(format!("echo \"{}\"", message.as_ref()))
    }

    /// `warn "<message>"` through the script's warning helper
    pub fn warn(&mut self, message: impl AsRef<str>) -> &mut Self {
        self.line(format!("warn \"{}\"", message.as_ref()))
    }

    /// `die "<message>"` through the script's fatal-error helper
    pub fn die(&mut self, message: impl AsRef<str>) -> &mut Self {
        self.line(format!("die \"{}\"", message.as_ref()))
    }

    /// Run a command; on failure print a warning and continue
    pub fn tolerate(&mut self, command: impl AsRef<str>, warning: impl AsRef<str>) -> &mut Self {
        self.line(format!(
            "{} || warn \"{}\"",
            command.as_ref(),
            warning.as_ref()
        ))
    }

    /// Run a command; on failure abort the script with exit code 1
    pub fn require(&mut self, command: impl AsRef<str>, error: impl AsRef<str>) -> &mut Self {
        self.line(format!("{} || die \"{}\"", command.as_ref(), error.as_ref()))
    }

    /// `if <condition>; then ... fi`
    pub fn if_block(
        &mut self,
        condition: impl AsRef<str>,
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.line(format!("if {}; then", condition.as_ref()));
        self.nested(body);
        self.line("fi")
    }

    /// `if <condition>; then ... else ... fi`
    pub fn if_else(
        &mut self,
        condition: impl AsRef<str>,
        then_body: impl FnOnce(&mut Self),
        else_body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.line(format!("if {}; then", condition.as_ref()));
        self.nested(then_body);
        self.line("else");
        self.nested(else_body);
        self.line("fi")
    }

    /// `for <var> in <words>; do ... done`; words are quoted individually
    pub fn for_each<S: AsRef<str>>(
        &mut self,
        var: &str,
        words: &[S],
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        let quoted: Vec<String> = words.iter().map(|w| quote(w.as_ref())).collect();
        self.line(format!("for {} in {}; do", var, quoted.join(" ")));
        self.nested(body);
        self.line("done")
    }

    /// Visual separator echoed to the terminal
    pub fn separator(&mut self) -> &mut Self {
        self.line("echo '-------------------------------------'")
    }

    fn nested(&mut self, body: impl FnOnce(&mut Self)) {
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    /// Lines emitted so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Render the script with LF line endings and a trailing newline
    pub fn build(self) -> String {
        let mut script = self.lines.join("\n");
        script.push('\n');
        script
    }
}
