//! Text rewriting: ordered token substitution over raw file text.
//!
//! Rules run single-pass, left to right, one rule after another, each
//! replacing every occurrence. A rule's output is visible to every later
//! rule, so `[("a", "ab"), ("ab", "c")]` turns `"a"` into `"c"`.
//! [`validate_rules`] reports rule sets where that chaining, or an earlier
//! pattern eating part of a later one, can happen. Nothing is reordered.
//!
//! Matching is a plain text scan: comments, identifiers and string literals
//! are all fair game.

use regex::{NoExpand, Regex, RegexBuilder};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::io;
use crate::layout::{BuildConfigTarget, RuleTemplate};
use crate::template;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone)]
enum Matcher {
    Literal,
    Pattern(Regex),
}

/// A single `from → to` substitution.
#[derive(Debug, Clone)]
pub struct ReplacementRule {
    pub from: String,
    pub to: String,
    matcher: Matcher,
}

/// An ordering hazard found in a rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleWarning {
    /// `chained`, `shadowed` or `unresolved_placeholder`.
    pub kind: String,
    /// Index of the rule the warning is about.
    pub rule: usize,
    /// Index of the other rule involved, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<usize>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextReport {
    pub files: Vec<TextFileReport>,
    pub missing: Vec<String>,
    /// Present but not readable as UTF-8 text; left untouched.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unreadable: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rule_warnings: Vec<RuleWarning>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextFileReport {
    pub file: String,
    pub replacements: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfigReport {
    pub path: String,
    pub present: bool,
    pub replacements: usize,
}

impl ReplacementRule {
    /// Exact substring match.
    pub fn literal(from: &str, to: &str) -> Result<Self> {
        if from.is_empty() {
            return Err(Error::validation_invalid_argument(
                "rules",
                "Rule pattern cannot be empty",
                Some(to.to_string()),
            ));
        }
        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            matcher: Matcher::Literal,
        })
    }

    /// Regular expression match. The replacement is inserted verbatim;
    /// `$1`-style references are not expanded.
    pub fn regex(from: &str, to: &str) -> Result<Self> {
        if from.is_empty() {
            return Self::literal(from, to);
        }
        let re = Regex::new(from).map_err(|e| Error::rewrite_invalid_pattern(from, e))?;
        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            matcher: Matcher::Pattern(re),
        })
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.matcher, Matcher::Literal)
    }

    pub fn is_match(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::Literal => text.contains(&self.from),
            Matcher::Pattern(re) => re.is_match(text),
        }
    }

    /// Replace every occurrence; returns the new text and the match count.
    pub fn apply(&self, text: &str) -> (String, usize) {
        match &self.matcher {
            Matcher::Literal => {
                let count = text.matches(self.from.as_str()).count();
                if count == 0 {
                    return (text.to_string(), 0);
                }
                (text.replace(&self.from, &self.to), count)
            }
            Matcher::Pattern(re) => {
                let count = re.find_iter(text).count();
                if count == 0 {
                    return (text.to_string(), 0);
                }
                (re.replace_all(text, NoExpand(&self.to)).into_owned(), count)
            }
        }
    }
}

// ============================================================================
// Rule construction and validation
// ============================================================================

/// Render rule templates against the profile's string fields.
///
/// Returns the rules in template order, plus warnings for replacements that
/// still carry an unknown `{{placeholder}}`.
pub fn render_rules(
    templates: &[RuleTemplate],
    vars: &HashMap<String, String>,
) -> Result<(Vec<ReplacementRule>, Vec<RuleWarning>)> {
    let mut rules = Vec::with_capacity(templates.len());
    let mut warnings = Vec::new();

    for (idx, tpl) in templates.iter().enumerate() {
        let to = template::render_map(&tpl.to, vars);
        for name in template::unresolved(&tpl.to, vars) {
            warnings.push(RuleWarning {
                kind: "unresolved_placeholder".to_string(),
                rule: idx,
                other: None,
                message: format!(
                    "Rule {} ('{}') references unknown profile field '{}'",
                    idx, tpl.from, name
                ),
            });
        }

        let rule = if tpl.regex {
            ReplacementRule::regex(&tpl.from, &to)?
        } else {
            ReplacementRule::literal(&tpl.from, &to)?
        };
        rules.push(rule);
    }

    Ok((rules, warnings))
}

/// Flag ordering hazards without changing the rule set.
///
/// - `chained`: a later pattern matches inside an earlier rule's replacement,
///   so text produced by the earlier rule is rewritten again.
/// - `shadowed`: an earlier pattern matches inside a later literal pattern, so
///   the later rule can never see its whole token.
pub fn validate_rules(rules: &[ReplacementRule]) -> Vec<RuleWarning> {
    let mut warnings = Vec::new();

    for (i, earlier) in rules.iter().enumerate() {
        for (j, later) in rules.iter().enumerate().skip(i + 1) {
            if later.is_match(&earlier.to) {
                warnings.push(RuleWarning {
                    kind: "chained".to_string(),
                    rule: j,
                    other: Some(i),
                    message: format!(
                        "Rule {} ('{}') matches inside the replacement '{}' of rule {}",
                        j, later.from, earlier.to, i
                    ),
                });
            }

            if later.is_literal() && earlier.is_match(&later.from) {
                warnings.push(RuleWarning {
                    kind: "shadowed".to_string(),
                    rule: j,
                    other: Some(i),
                    message: format!(
                        "Rule {} ('{}') rewrites part of '{}' before rule {} runs",
                        i, earlier.from, later.from, j
                    ),
                });
            }
        }
    }

    warnings
}

/// Apply every rule in order; returns the new text and the total match count.
pub fn apply_rules(text: &str, rules: &[ReplacementRule]) -> (String, usize) {
    let mut content = text.to_string();
    let mut total = 0;

    for rule in rules {
        let (next, count) = rule.apply(&content);
        content = next;
        total += count;
    }

    (content, total)
}

// ============================================================================
// File rewriting
// ============================================================================

/// Rewrite each file under `root` with `rules`. Missing or unreadable files
/// are skipped with a warning; only a failed write is fatal.
pub fn rewrite_files(root: &Path, files: &[String], rules: &[ReplacementRule]) -> Result<TextReport> {
    let mut report = TextReport::default();

    for file in files {
        let path = root.join(file);
        if !path.is_file() {
            let message = format!("Text file not found: {}", file);
            log_status!("text", "{}", message);
            report.missing.push(file.clone());
            report.warnings.push(message);
            continue;
        }

        let content = match io::read_file(&path, &format!("read {}", file)) {
            Ok(content) => content,
            Err(err) => {
                let cause = err.details["error"].as_str().unwrap_or(&err.message);
                let message = format!("Text file not readable: {}: {}", file, cause);
                log_status!("text", "{}", message);
                report.unreadable.push(file.clone());
                report.warnings.push(message);
                continue;
            }
        };
        let (new_content, replacements) = apply_rules(&content, rules);
        io::write_file(&path, &new_content, &format!("write {}", file))?;

        log_status!("text", "Updated {} ({} replacements)", file, replacements);
        report.files.push(TextFileReport {
            file: file.clone(),
            replacements,
        });
    }

    Ok(report)
}

/// Case-insensitive rewrite of the product codename in the build script.
///
/// An absent build script is an expected layout and is skipped without a
/// warning.
pub fn patch_build_config(
    root: &Path,
    target: &BuildConfigTarget,
    replacement: &str,
) -> Result<BuildConfigReport> {
    let path = root.join(&target.path);
    if !path.is_file() {
        return Ok(BuildConfigReport {
            path: target.path.clone(),
            present: false,
            replacements: 0,
        });
    }

    let rule = codename_rule(&target.token, replacement)?;
    let content = io::read_file(&path, &format!("read {}", target.path))?;
    let (new_content, replacements) = rule.apply(&content);
    io::write_file(&path, &new_content, &format!("write {}", target.path))?;

    log_status!("build", "Updated {} ({} replacements)", target.path, replacements);
    Ok(BuildConfigReport {
        path: target.path.clone(),
        present: true,
        replacements,
    })
}

fn codename_rule(token: &str, replacement: &str) -> Result<ReplacementRule> {
    if token.is_empty() {
        return Err(Error::validation_invalid_argument(
            "buildConfig.token",
            "Build config token cannot be empty",
            None,
        ));
    }
    let re = RegexBuilder::new(&regex::escape(token))
        .case_insensitive(true)
        .build()
        .map_err(|e| Error::rewrite_invalid_pattern(token, e))?;

    Ok(ReplacementRule {
        from: token.to_string(),
        to: replacement.to_string(),
        matcher: Matcher::Pattern(re),
    })
}

// ============================================================================
// Tests
// ============================================================================
