//! Static classification tables.

use phf::phf_map;

/// What a file extension says about the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionRule {
    /// The extension maps to exactly one language.
    Unique(&'static str),
    /// The extension is shared; content decides, the first candidate is the default.
    Ambiguous(&'static [&'static str]),
}

/// Lower-cased extension (without dot) to language.
pub static EXTENSIONS: phf::Map<&'static str, ExtensionRule> = phf_map! {
    "py" => ExtensionRule::Unique("python"),
    "pyw" => ExtensionRule::Unique("python"),
    "pyi" => ExtensionRule::Unique("python"),
    "js" => ExtensionRule::Unique("javascript"),
    "mjs" => ExtensionRule::Unique("javascript"),
    "cjs" => ExtensionRule::Unique("javascript"),
    "jsx" => ExtensionRule::Unique("javascript"),
    "ts" => ExtensionRule::Unique("typescript"),
    "tsx" => ExtensionRule::Unique("typescript"),
    "mts" => ExtensionRule::Unique("typescript"),
    "cts" => ExtensionRule::Unique("typescript"),
    "go" => ExtensionRule::Unique("go"),
    "java" => ExtensionRule::Unique("java"),
    "c" => ExtensionRule::Unique("c"),
    "h" => ExtensionRule::Ambiguous(&["c", "c++"]),
    "cc" => ExtensionRule::Unique("c++"),
    "cpp" => ExtensionRule::Unique("c++"),
    "cxx" => ExtensionRule::Unique("c++"),
    "c++" => ExtensionRule::Unique("c++"),
    "hh" => ExtensionRule::Unique("c++"),
    "hpp" => ExtensionRule::Unique("c++"),
    "hxx" => ExtensionRule::Unique("c++"),
    "cs" => ExtensionRule::Unique("c#"),
    "rs" => ExtensionRule::Unique("rust"),
    "rb" => ExtensionRule::Unique("ruby"),
    "rake" => ExtensionRule::Unique("ruby"),
    "gemspec" => ExtensionRule::Unique("ruby"),
    "php" => ExtensionRule::Unique("php"),
    "phtml" => ExtensionRule::Unique("php"),
    "php5" => ExtensionRule::Unique("php"),
    "sh" => ExtensionRule::Unique("shell"),
    "bash" => ExtensionRule::Unique("shell"),
    "zsh" => ExtensionRule::Unique("shell"),
    "ksh" => ExtensionRule::Unique("shell"),
    "scala" => ExtensionRule::Unique("scala"),
    "sc" => ExtensionRule::Unique("scala"),
    "swift" => ExtensionRule::Unique("swift"),
    "kt" => ExtensionRule::Unique("kotlin"),
    "kts" => ExtensionRule::Unique("kotlin"),
};

/// Exact file names that identify a language regardless of extension.
pub static FILENAMES: phf::Map<&'static str, &'static str> = phf_map! {
    "Rakefile" => "ruby",
    "Gemfile" => "ruby",
    "Podfile" => "ruby",
    "SConstruct" => "python",
    "SConscript" => "python",
    "Jakefile" => "javascript",
    ".bashrc" => "shell",
    ".bash_profile" => "shell",
    ".zshrc" => "shell",
    ".profile" => "shell",
    "PKGBUILD" => "shell",
};

/// Shebang interpreter (version suffix stripped) to language.
pub static INTERPRETERS: phf::Map<&'static str, &'static str> = phf_map! {
    "python" => "python",
    "pypy" => "python",
    "node" => "javascript",
    "nodejs" => "javascript",
    "deno" => "typescript",
    "ts-node" => "typescript",
    "sh" => "shell",
    "bash" => "shell",
    "zsh" => "shell",
    "ksh" => "shell",
    "dash" => "shell",
    "ash" => "shell",
    "ruby" => "ruby",
    "php" => "php",
    "scala" => "scala",
    "swift" => "swift",
};

/// User-facing aliases to canonical identifiers.
pub static ALIASES: phf::Map<&'static str, &'static str> = phf_map! {
    "py" => "python",
    "python2" => "python",
    "python3" => "python",
    "js" => "javascript",
    "node" => "javascript",
    "nodejs" => "javascript",
    "ecmascript" => "javascript",
    "ts" => "typescript",
    "golang" => "go",
    "cpp" => "c++",
    "cxx" => "c++",
    "cplusplus" => "c++",
    "csharp" => "c#",
    "cs" => "c#",
    "rs" => "rust",
    "rb" => "ruby",
    "bash" => "shell",
    "sh" => "shell",
    "zsh" => "shell",
    "kt" => "kotlin",
};

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_LANGUAGES: &[&str] = &[
        "c", "c#", "c++", "go", "java", "javascript", "kotlin", "php", "python", "ruby", "rust",
        "scala", "shell", "swift", "typescript",
    ];

    #[test]
    fn test_tables_only_produce_known_languages() {
        for rule in EXTENSIONS.values() {
            match rule {
                ExtensionRule::Unique(lang) => assert!(KNOWN_LANGUAGES.contains(lang)),
                ExtensionRule::Ambiguous(candidates) => {
                    assert!(candidates.len() > 1);
                    assert!(candidates.iter().all(|c| KNOWN_LANGUAGES.contains(c)));
                }
            }
        }
        for lang in FILENAMES.values().chain(INTERPRETERS.values()) {
            assert!(KNOWN_LANGUAGES.contains(lang), "unknown language {}", lang);
        }
        for lang in ALIASES.values() {
            assert!(KNOWN_LANGUAGES.contains(lang), "unknown alias target {}", lang);
        }
    }

    #[test]
    fn test_aliases_never_shadow_canonical_ids() {
        for id in KNOWN_LANGUAGES {
            assert!(!ALIASES.contains_key(id), "{} is both canonical and alias", id);
        }
    }
}
