use std::fmt;

use crate::template::{expand, substitute, tokenize, Bindings};
use crate::{ActionKind, Platform, Profile};

/// Program followed by its arguments, handed to process creation as-is.
/// Never interpreted by a shell as one string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    argv: Vec<String>,
}

impl EditorCommand {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or_default()
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }

    pub fn into_argv(self) -> Vec<String> {
        self.argv
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv.join(" "))
    }
}

/// What a command opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTarget<'a> {
    /// Line and column are 1-based.
    File {
        path: &'a str,
        line: u32,
        column: u32,
    },
    Project {
        path: &'a str,
    },
}

impl OpenTarget<'_> {
    pub fn kind(&self) -> ActionKind {
        match self {
            OpenTarget::File { .. } => ActionKind::OpenFile,
            OpenTarget::Project { .. } => ActionKind::OpenProject,
        }
    }
}

fn launch_prefix(platform: Platform, executable: &str) -> Vec<String> {
    match platform {
        Platform::MacOs => vec!["open".into(), "-a".into(), executable.into()],
        Platform::Windows => vec!["cmd".into(), "/c".into(), executable.into()],
        Platform::Other => vec![executable.into()],
    }
}

/// Builds the invocation that opens `file_path` at `line`:`column`.
pub fn build_open_file(
    profile: &Profile,
    file_path: &str,
    line: u32,
    column: u32,
    platform: Platform,
) -> EditorCommand {
    let mut argv = launch_prefix(platform, &profile.executable_path);

    if platform == Platform::MacOs
        && profile.use_custom_protocol
        && !profile.protocol_prefix.is_empty()
    {
        // One opaque URL argument; the template is not consulted.
        argv.push(format!(
            "{}file{}:{}:{}",
            profile.protocol_prefix, file_path, line, column
        ));
        return EditorCommand { argv };
    }

    argv.extend(expand(
        &profile.open_file_args_template,
        &Bindings::for_file(file_path, line, column),
    ));
    EditorCommand { argv }
}

/// Builds the invocation that opens the project rooted at `project_path`.
///
/// When the substituted template is just the project path, the path is passed as a
/// single argument without tokenizing, so it survives any characters it contains.
pub fn build_open_project(
    profile: &Profile,
    project_path: &str,
    platform: Platform,
) -> EditorCommand {
    let mut argv = launch_prefix(platform, &profile.executable_path);
    let args = substitute(
        &profile.open_project_args_template,
        &Bindings::for_project(project_path),
    );

    if args.trim() == project_path {
        argv.push(project_path.to_string());
    } else {
        argv.extend(tokenize(&args));
    }
    EditorCommand { argv }
}

/// Single entry point dispatching on the target variant.
pub fn build(profile: &Profile, target: OpenTarget<'_>, platform: Platform) -> EditorCommand {
    match target {
        OpenTarget::File { path, line, column } => {
            build_open_file(profile, path, line, column, platform)
        }
        OpenTarget::Project { path } => build_open_project(profile, path, platform),
    }
}
