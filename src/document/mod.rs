// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::ast::{ArraySyntax, Collection, ConfigFunction, Program, Value};
use crate::options::EditorOptions;
use crate::printer::Printer;
use crate::{parser, utils, ConfigError};

mod access;
mod conversion;
mod edit;
mod sort;

pub use sort::SortMode;

/// An editable array file: a `<?php ... return [ ... ];` document.
///
/// Edits are applied to the parsed tree in memory; [`Document::render`]
/// prints it back, reproducing untouched parts of the source as they were.
///
/// # Example
/// ```ignore
/// let mut doc = Document::read("config/database.php", false)?;
/// doc.set("connections.sqlite.driver", "sqlite")?
///     .set("default", Document::function("env", vec!["DB_CONNECTION".into(), "sqlite".into()]))?;
/// doc.sort(SortMode::Ascending);
/// doc.write()?;
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    program: Program,
    path: Option<PathBuf>,
    printer: Printer,
    options: EditorOptions,
}

impl Document {
    /// Load an array file.
    ///
    /// A missing file is an error unless `create_missing` is set, in which
    /// case the document starts out as `return [];` and `write()` creates it.
    pub fn read<P: AsRef<Path>>(path: P, create_missing: bool) -> Result<Self, ConfigError> {
        Self::read_with(path, create_missing, EditorOptions::default())
    }

    pub fn read_with<P: AsRef<Path>>(
        path: P,
        create_missing: bool,
        options: EditorOptions,
    ) -> Result<Self, ConfigError> {
        let path = utils::expand_home(path.as_ref());

        let source = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if !create_missing {
                    return Err(ConfigError::NotFound {
                        path: path.to_string_lossy().to_string(),
                        hint: Some("Pass create_missing = true to start from an empty file".into()),
                        code: Some(301),
                    });
                }
                tracing::debug!(path = %path.display(), "array file missing, seeding an empty one");
                empty_source(&options)
            }
            Err(e) => {
                return Err(ConfigError::File {
                    message: format!("Failed to read file: {}", e),
                    path: path.to_string_lossy().to_string(),
                    hint: Some("Check that the file exists and is readable".into()),
                    code: Some(302),
                });
            }
        };

        let mut document = Self::from_str_with(&source, options)?;
        tracing::debug!(path = %path.display(), items = document.root().len(), "loaded array file");
        document.path = Some(path);
        Ok(document)
    }

    /// Parse an array file from a string (no file I/O).
    pub fn from_str(source: &str) -> Result<Self, ConfigError> {
        Self::from_str_with(source, EditorOptions::default())
    }

    pub fn from_str_with(source: &str, options: EditorOptions) -> Result<Self, ConfigError> {
        let program = parser::parse(source)?;

        let body = &source[program.prologue.len()..];
        let indent = options
            .indent
            .clone()
            .or_else(|| utils::detect_indent(body))
            .unwrap_or_else(|| "    ".to_string());
        let line_ending = options
            .line_ending
            .or_else(|| utils::detect_line_ending(source))
            .unwrap_or_default();

        Ok(Self {
            program,
            path: None,
            printer: Printer::new(indent, line_ending),
            options,
        })
    }

    /// A document holding `return [];` and no path.
    pub fn empty() -> Self {
        let options = EditorOptions::default();
        let newline = options.line_ending.unwrap_or_default().as_str();
        Self {
            program: Program {
                prologue: format!("<?php{0}{0}", newline),
                before_root: " ".into(),
                root: Collection::new(),
                after_root: String::new(),
                epilogue: newline.to_string(),
            },
            path: None,
            printer: Printer::default(),
            options,
        }
    }

    /// Build a function-call value for [`Document::set`].
    pub fn function(name: impl Into<String>, args: Vec<Value>) -> ConfigFunction {
        ConfigFunction::new(name, args)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn root(&self) -> &Collection {
        &self.program.root
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Print the document back to source text.
    pub fn render(&self) -> String {
        self.printer.render(&self.program)
    }

    /// Render and save to the path the document was read from.
    pub fn write(&self) -> Result<(), ConfigError> {
        let path = self.path.as_ref().ok_or_else(|| ConfigError::File {
            message: "Document was not read from a file".into(),
            path: String::new(),
            hint: Some("Use write_to(path) for documents built from a string".into()),
            code: Some(303),
        })?;
        self.write_to(path)
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = utils::expand_home(path.as_ref());
        let rendered = self.render();
        fs::write(&path, &rendered).map_err(|e| ConfigError::File {
            message: format!("Failed to write file: {}", e),
            path: path.to_string_lossy().to_string(),
            hint: Some("Check that the directory exists and is writable".into()),
            code: Some(304),
        })?;
        tracing::debug!(path = %path.display(), bytes = rendered.len(), "wrote array file");
        Ok(())
    }
}

fn empty_source(options: &EditorOptions) -> String {
    let newline = options.line_ending.unwrap_or_default().as_str();
    let empty = match options.array_syntax {
        ArraySyntax::Short => "[]",
        ArraySyntax::Long => "array()",
    };
    format!("<?php{0}{0}return {1};{0}", newline, empty)
}
