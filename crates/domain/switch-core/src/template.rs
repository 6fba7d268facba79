//! Argument templates: placeholder substitution followed by quote-aware splitting.
//!
//! Placeholders are exactly `{file}`, `{line}`, `{column}` and `{project}`. Any other
//! `{...}` text, and any placeholder without a bound value, passes through untouched.

/// Values available to a template. Unbound placeholders are left in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bindings<'a> {
    pub file: Option<&'a str>,
    /// 1-based.
    pub line: Option<u32>,
    /// 1-based.
    pub column: Option<u32>,
    pub project: Option<&'a str>,
}

impl<'a> Bindings<'a> {
    pub fn for_file(file: &'a str, line: u32, column: u32) -> Self {
        Self {
            file: Some(file),
            line: Some(line),
            column: Some(column),
            project: None,
        }
    }

    pub fn for_project(project: &'a str) -> Self {
        Self {
            project: Some(project),
            ..Self::default()
        }
    }

    fn value_for(&self, placeholder: Placeholder) -> Option<String> {
        match placeholder {
            Placeholder::File => self.file.map(str::to_string),
            Placeholder::Line => self.line.map(|n| n.to_string()),
            Placeholder::Column => self.column.map(|n| n.to_string()),
            Placeholder::Project => self.project.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    File,
    Line,
    Column,
    Project,
}

const PLACEHOLDERS: [(&str, Placeholder); 4] = [
    ("{file}", Placeholder::File),
    ("{line}", Placeholder::Line),
    ("{column}", Placeholder::Column),
    ("{project}", Placeholder::Project),
];

/// Replaces bound placeholders in a single left-to-right pass, so substituted values
/// are never themselves re-expanded (a file named `{line}.txt` stays intact).
pub fn substitute(template: &str, bindings: &Bindings<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        let hit = PLACEHOLDERS
            .iter()
            .find(|(token, _)| tail.starts_with(token))
            .and_then(|(token, placeholder)| {
                bindings
                    .value_for(*placeholder)
                    .map(|value| (token.len(), value))
            });

        match hit {
            Some((consumed, value)) => {
                out.push_str(&value);
                rest = &tail[consumed..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Splits on unquoted whitespace. `"` and `'` each open a quoted run closed only by the
/// same character; quote characters are dropped, quoted content is kept verbatim, and an
/// unterminated quote runs to the end of the input. Never yields empty tokens.
pub fn tokenize(args: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for ch in args.chars() {
        match quote {
            Some(open) if ch == open => quote = None,
            Some(_) => current.push(ch),
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                c if c.is_whitespace() => {
                    if !current.is_empty() {
                        parts.push(std::mem::take(&mut current));
                    }
                }
                c => current.push(c),
            },
        }
    }

    if !current.is_empty() {
        parts.push(current);
    }

    parts
}

/// `substitute` then `tokenize`.
pub fn expand(template: &str, bindings: &Bindings<'_>) -> Vec<String> {
    tokenize(&substitute(template, bindings))
}
