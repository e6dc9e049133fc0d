//! Language classifier.
//!
//! Resolution order for a path (an explicit override is handled by the
//! caller and never reaches the classifier):
//! 1. configured glob overrides
//! 2. well-known file names
//! 3. extension table (ambiguous extensions consult the content sample)
//! 4. content: shebang line, then opening tags
//!
//! Classification is a pure function of the path, the sample and the
//! overrides the classifier was built with.

use globset::{Glob, GlobSet, GlobSetBuilder};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

use super::table::{ExtensionRule, EXTENSIONS, FILENAMES, INTERPRETERS};
use super::Language;

/// Maximum number of content bytes inspected.
pub const SAMPLE_LEN: usize = 16 * 1024;

lazy_static! {
    /// Content markers that select a non-default candidate of an ambiguous extension.
    static ref DISAMBIGUATION: Vec<(&'static str, Regex)> = vec![(
        "c++",
        Regex::new(
            r"(?m)^\s*(namespace\s+\w+|template\s*<|(public|private|protected)\s*:|class\s+\w+\s*(final\s*)?[:{]|using\s+namespace\b)|std::|#include\s*<(iostream|string|vector|memory|map|algorithm)>",
        )
        .expect("valid regex"),
    )];
    static ref INTERPRETER_VERSION: Regex = Regex::new(r"^([a-z][a-z-]*?)[0-9.]*$").expect("valid regex");
}

/// Language classifier.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    overrides: Option<(GlobSet, Vec<Language>)>,
}

impl Classifier {
    /// Create a classifier using only the static tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with glob overrides consulted before the static tables.
    ///
    /// Earlier patterns win when several match.
    pub fn with_overrides<I>(overrides: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, Language)>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut languages = Vec::new();
        for (pattern, lang) in overrides {
            let glob = Glob::new(&pattern)
                .map_err(|e| anyhow::anyhow!("invalid language override {:?}: {}", pattern, e))?;
            builder.add(glob);
            languages.push(lang);
        }
        if languages.is_empty() {
            return Ok(Self::new());
        }
        Ok(Self {
            overrides: Some((builder.build()?, languages)),
        })
    }

    /// Detect the language of a file. Returns `None` when no rule matches.
    pub fn classify(&self, path: &Path, sample: Option<&[u8]>) -> Option<Language> {
        let sample = sample.map(|s| String::from_utf8_lossy(&s[..s.len().min(SAMPLE_LEN)]));
        let sample = sample.as_deref();

        if let Some(lang) = self.match_override(path) {
            return Some(lang);
        }

        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if let Some(lang) = FILENAMES.get(file_name) {
            return Some(Language::canonical(lang));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        if let Some(rule) = ext.as_deref().and_then(|e| EXTENSIONS.get(e)) {
            return Some(match rule {
                ExtensionRule::Unique(lang) => Language::canonical(lang),
                ExtensionRule::Ambiguous(candidates) => disambiguate(candidates, sample),
            });
        }

        sample.and_then(classify_content)
    }

    fn match_override(&self, path: &Path) -> Option<Language> {
        let (set, languages) = self.overrides.as_ref()?;
        set.matches(path)
            .into_iter()
            .min()
            .map(|idx| languages[idx].clone())
    }
}

/// Pick a candidate for an ambiguous extension; the first one is the default.
fn disambiguate(candidates: &'static [&'static str], sample: Option<&str>) -> Language {
    if let Some(text) = sample {
        for candidate in &candidates[1..] {
            let marked = DISAMBIGUATION
                .iter()
                .any(|(lang, re)| lang == candidate && re.is_match(text));
            if marked {
                return Language::canonical(candidate);
            }
        }
    }
    Language::canonical(candidates[0])
}

/// Content-only detection for files without a usable extension.
fn classify_content(text: &str) -> Option<Language> {
    let text = text.trim_start_matches('\u{feff}');
    if let Some(lang) = shebang_language(text) {
        return Some(lang);
    }
    if text.trim_start().starts_with("<?php") {
        return Some(Language::canonical("php"));
    }
    None
}

/// Parse `#!/usr/bin/env python3` style lines.
fn shebang_language(text: &str) -> Option<Language> {
    let line = text.lines().next()?.strip_prefix("#!")?;
    let mut words = line.split_whitespace();
    let program = words.next()?;
    let mut interpreter = program.rsplit('/').next()?;
    if interpreter == "env" {
        // Skip env flags and VAR=value assignments.
        interpreter = words.find(|w| !w.starts_with('-') && !w.contains('='))?;
    }
    let caps = INTERPRETER_VERSION.captures(interpreter)?;
    INTERPRETERS
        .get(caps.get(1)?.as_str())
        .map(|lang| Language::canonical(lang))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::table::EXTENSIONS;

    fn classify(path: &str, content: Option<&str>) -> Option<String> {
        Classifier::new()
            .classify(Path::new(path), content.map(str::as_bytes))
            .map(|l| l.to_string())
    }

    #[test]
    fn test_every_unique_extension_maps_to_its_language() {
        for (ext, rule) in EXTENSIONS.entries() {
            if let ExtensionRule::Unique(lang) = rule {
                let name = format!("hello.{}", ext);
                assert_eq!(classify(&name, None).as_deref(), Some(*lang), "{}", name);
            }
        }
    }

    #[test]
    fn test_extension_case_insensitive() {
        assert_eq!(classify("Main.JAVA", None).as_deref(), Some("java"));
        assert_eq!(classify("dir/hello.PY", None).as_deref(), Some("python"));
    }

    #[test]
    fn test_ambiguous_header_defaults_to_c() {
        assert_eq!(classify("util.h", None).as_deref(), Some("c"));
        assert_eq!(
            classify("util.h", Some("#include <stdio.h>\nint add(int a, int b);\n")).as_deref(),
            Some("c")
        );
    }

    #[test]
    fn test_ambiguous_header_with_cpp_markers() {
        let src = "#pragma once\nnamespace util {\nclass Point {\npublic:\n  int x;\n};\n}\n";
        assert_eq!(classify("point.h", Some(src)).as_deref(), Some("c++"));
        assert_eq!(
            classify("vec.h", Some("#include <vector>\nstd::vector<int> v;\n")).as_deref(),
            Some("c++")
        );
    }

    #[test]
    fn test_shebang_detection() {
        assert_eq!(
            classify("run", Some("#!/usr/bin/env python3\nprint('hi')\n")).as_deref(),
            Some("python")
        );
        assert_eq!(classify("build", Some("#!/bin/bash\necho hi\n")).as_deref(), Some("shell"));
        assert_eq!(
            classify("tool", Some("#!/usr/bin/env -S node --no-warnings\n")).as_deref(),
            Some("javascript")
        );
        assert_eq!(classify("x", Some("#!/usr/bin/ruby2.7 -w\n")).as_deref(), Some("ruby"));
        assert_eq!(classify("x", Some("#!/usr/bin/perl\n")), None);
    }

    #[test]
    fn test_extension_wins_over_shebang() {
        assert_eq!(
            classify("script.sh", Some("#!/usr/bin/env python\n")).as_deref(),
            Some("shell")
        );
    }

    #[test]
    fn test_php_open_tag() {
        assert_eq!(classify("index", Some("<?php echo 1;")).as_deref(), Some("php"));
    }

    #[test]
    fn test_filenames() {
        assert_eq!(classify("project/Rakefile", None).as_deref(), Some("ruby"));
        assert_eq!(classify("/home/u/.bashrc", None).as_deref(), Some("shell"));
    }

    #[test]
    fn test_not_detected() {
        assert_eq!(classify("README", Some("just some words")), None);
        assert_eq!(classify("data.unknownext", None), None);
        assert_eq!(classify("noext", None), None);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let classifier = Classifier::with_overrides(vec![
            ("*.h".to_string(), Language::resolve("cpp").unwrap()),
            ("**/gen/*.txt".to_string(), Language::resolve("go").unwrap()),
            ("*.txt".to_string(), Language::resolve("python").unwrap()),
        ])
        .unwrap();
        let detect = |p: &str| classifier.classify(Path::new(p), None).map(|l| l.to_string());
        assert_eq!(detect("include/a.h").as_deref(), Some("c++"));
        assert_eq!(detect("src/gen/x.txt").as_deref(), Some("go"));
        assert_eq!(detect("notes.txt").as_deref(), Some("python"));
        assert_eq!(detect("main.c").as_deref(), Some("c"));
    }

    #[test]
    fn test_invalid_override_pattern() {
        let result = Classifier::with_overrides(vec![("a[".to_string(), Language::resolve("c").unwrap())]);
        assert!(result.is_err());
    }

    #[test]
    fn test_deterministic() {
        let src = Some("#include <iostream>\nint main() {}\n");
        let first = classify("main.h", src);
        for _ in 0..10 {
            assert_eq!(classify("main.h", src), first);
        }
    }
}
