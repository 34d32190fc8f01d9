//! Minimal filesystem-only stand-in for the loader protocol of spec §6.
//!
//! The real gem/library vendoring system (`add(library)` resolving against
//! an installed package index, `git`-backed signature repositories) is an
//! explicit external collaborator, out of scope for this core (spec §1,
//! §6). This loader gives the CLI enough to walk a directory tree of
//! `*.sig` files end to end; a `-r LIBRARY` request that doesn't match a
//! bundled resource is reported rather than silently ignored.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const BUILTIN_STDLIB: &str = include_str!("../stdlib/builtins.sig");

#[derive(Debug, Clone)]
enum Source {
    Library(String),
    Directory(PathBuf),
}

/// Configures and walks the sources a `sigil` invocation should load from
/// (spec §6: "add(library: name) / add(path: dir) / no_builtin!").
#[derive(Debug, Clone, Default)]
pub struct Loader {
    sources: Vec<Source>,
    no_builtin: bool,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_library(&mut self, name: impl Into<String>) {
        self.sources.push(Source::Library(name.into()));
    }

    pub fn add_path(&mut self, dir: impl Into<PathBuf>) {
        self.sources.push(Source::Directory(dir.into()));
    }

    pub fn no_builtin(&mut self) {
        self.no_builtin = true;
    }

    /// The sources this loader would read from, for the `paths` command
    /// (spec §6).
    pub fn describe(&self) -> Vec<String> {
        let mut out = Vec::new();
        if !self.no_builtin {
            out.push("<builtin stdlib>".to_string());
        }
        for source in &self.sources {
            match source {
                Source::Library(name) => out.push(format!("-r {name}")),
                Source::Directory(dir) => out.push(dir.display().to_string()),
            }
        }
        out
    }

    /// Enumerate every `.sig` file reachable from the configured sources,
    /// returning `(sub_path, contents)` pairs (spec §6: "each_signature(path)
    /// → iterable of (sub_path, bytes)").
    pub fn load_all(&self) -> Result<Vec<(PathBuf, String)>> {
        let mut out = Vec::new();
        if !self.no_builtin {
            out.push((PathBuf::from("builtins.sig"), BUILTIN_STDLIB.to_string()));
        }
        for source in &self.sources {
            match source {
                Source::Library(name) => {
                    log::warn!(
                        "library `{name}` requested but this build vendors no library index; \
                         pass -I to point at an extracted copy of it instead"
                    );
                }
                Source::Directory(dir) => {
                    out.extend(each_signature(dir)?);
                }
            }
        }
        Ok(out)
    }
}

/// Walk `root` recursively, collecting every `.sig` file as `(sub_path,
/// contents)` relative to `root` (spec §6 loader protocol).
pub fn each_signature(root: &Path) -> Result<Vec<(PathBuf, String)>> {
    let mut out = Vec::new();
    visit(root, root, &mut out)?;
    out.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(out)
}

fn visit(root: &Path, dir: &Path, out: &mut Vec<(PathBuf, String)>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            visit(root, &path, out)?;
        } else if path.extension().and_then(|e| e.to_str()) == Some("sig") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let sub_path = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            out.push((sub_path, contents));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn walks_nested_sig_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.sig"), "class A end").unwrap();
        fs::write(dir.path().join("ignore.txt"), "not a signature").unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("b.sig"), "class B end").unwrap();

        let files = each_signature(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|(p, _)| p == Path::new("a.sig")));
        assert!(files
            .iter()
            .any(|(p, _)| p == Path::new("nested").join("b.sig").as_path()));
    }

    #[test]
    fn builtin_stdlib_loads_by_default() {
        let loader = Loader::new();
        let files = loader.load_all().unwrap();
        assert!(files.iter().any(|(p, _)| p == Path::new("builtins.sig")));
    }

    #[test]
    fn no_builtin_suppresses_bundled_stdlib() {
        let mut loader = Loader::new();
        loader.no_builtin();
        let files = loader.load_all().unwrap();
        assert!(files.is_empty());
    }
}
