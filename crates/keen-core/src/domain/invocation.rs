//! The parsed command line, reduced to what the pipeline needs.

use std::fmt;

use crate::domain::error::DomainError;

const TYPE_FLAG: &str = "--type";

/// A single request to create a project.
///
/// `project_type` is always lowercase and may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    project_name: String,
    project_type: String,
}

impl Invocation {
    /// Read an invocation from raw argument tokens.
    ///
    /// - The first `--type=<value>` token, or `--type` followed by a
    ///   non-empty token, supplies the flag type. Scanning stops at that
    ///   match.
    /// - Every token not starting with `-` is positional, including a token
    ///   already used as a `--type` value. The first positional is the
    ///   project name and the second is the fallback type.
    ///
    /// Extra positionals and unrecognised dash tokens are ignored.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, DomainError> {
        let flag_type = type_flag(args);

        let mut positionals = args
            .iter()
            .map(AsRef::as_ref)
            .filter(|arg| !arg.starts_with('-'));
        let project_name = positionals.next().map(str::to_owned);
        let positional_type = positionals.next().map(str::to_owned);

        Self::new(project_name, flag_type, positional_type)
    }

    /// Build an invocation from already separated pieces.
    ///
    /// An empty flag type counts as absent, so the positional type is used
    /// instead. An empty project name counts as missing.
    pub fn new(
        project_name: Option<String>,
        flag_type: Option<String>,
        positional_type: Option<String>,
    ) -> Result<Self, DomainError> {
        let project_name = project_name
            .filter(|name| !name.is_empty())
            .ok_or(DomainError::MissingProjectName)?;

        let project_type = flag_type
            .filter(|t| !t.is_empty())
            .or(positional_type)
            .unwrap_or_default()
            .to_lowercase();

        Ok(Self {
            project_name,
            project_type,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Requested project type, lowercased. Empty when none was given.
    pub fn project_type(&self) -> &str {
        &self.project_type
    }
}

/// Value of the first `--type` match, which may be empty for `--type=`.
fn type_flag<S: AsRef<str>>(args: &[S]) -> Option<String> {
    args.iter().enumerate().find_map(|(i, arg)| {
        let arg = arg.as_ref();
        if let Some(value) = arg.strip_prefix(TYPE_FLAG).and_then(|rest| rest.strip_prefix('=')) {
            return Some(value.to_owned());
        }
        match args.get(i + 1).map(AsRef::as_ref) {
            Some(next) if arg == TYPE_FLAG && !next.is_empty() => Some(next.to_owned()),
            _ => None,
        }
    })
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.project_type.is_empty() {
            write!(f, "{}", self.project_name)
        } else {
            write!(f, "{} ({})", self.project_name, self.project_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(args: &[&str]) -> Invocation {
        Invocation::from_args(args).unwrap()
    }

    fn name_and_type(args: &[&str]) -> (String, String) {
        let inv = read(args);
        (inv.project_name().to_owned(), inv.project_type().to_owned())
    }

    #[test]
    fn no_arguments_is_missing_name() {
        assert_eq!(
            Invocation::from_args::<&str>(&[]),
            Err(DomainError::MissingProjectName)
        );
    }

    #[test]
    fn only_dash_tokens_is_missing_name() {
        assert_eq!(
            Invocation::from_args(&["-x", "--type=vscode", "--"]),
            Err(DomainError::MissingProjectName)
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(Invocation::from_args(&["", "web"]).is_err());
    }

    #[test]
    fn name_only() {
        assert_eq!(name_and_type(&["demo"]), ("demo".into(), String::new()));
    }

    #[test]
    fn type_flag_with_equals() {
        assert_eq!(name_and_type(&["demo", "--type=VSCode"]).1, "vscode");
    }

    #[test]
    fn equals_value_keeps_everything_after_first_equals() {
        assert_eq!(name_and_type(&["demo", "--type=a=b"]).1, "a=b");
    }

    #[test]
    fn value_after_type_flag_is_also_positional() {
        assert_eq!(
            name_and_type(&["--type", "vscode", "demo"]),
            ("vscode".into(), "vscode".into())
        );
    }

    #[test]
    fn type_flag_value_alone_names_the_project() {
        assert_eq!(
            name_and_type(&["--type", "vscode"]),
            ("vscode".into(), "vscode".into())
        );
    }

    #[test]
    fn extra_positionals_are_ignored() {
        assert_eq!(
            name_and_type(&["demo", "web", "extra"]),
            ("demo".into(), "web".into())
        );
    }

    #[test]
    fn unknown_dash_tokens_are_ignored() {
        assert_eq!(name_and_type(&["demo", "-x"]), ("demo".into(), String::new()));
    }

    #[test]
    fn trailing_type_flag_does_not_match() {
        assert_eq!(name_and_type(&["demo", "--type"]), ("demo".into(), String::new()));
        assert_eq!(
            name_and_type(&["demo", "web", "--type"]),
            ("demo".into(), "web".into())
        );
    }

    #[test]
    fn type_flag_value_may_start_with_dash() {
        assert_eq!(name_and_type(&["demo", "--type", "-X"]).1, "-x");
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(
            name_and_type(&["demo", "--type", "one", "--type=two"]).1,
            "one"
        );
        assert_eq!(
            name_and_type(&["demo", "--type=one", "--type", "two"]).1,
            "one"
        );
    }

    #[test]
    fn empty_equals_value_stops_scan_and_falls_back() {
        assert_eq!(
            name_and_type(&["demo", "Web", "--type=", "--type=vscode"]).1,
            "web"
        );
    }

    #[test]
    fn type_flag_beats_positional() {
        assert_eq!(name_and_type(&["demo", "default", "--type=VSCode"]).1, "vscode");
    }

    #[test]
    fn similar_flags_are_not_type() {
        assert_eq!(name_and_type(&["demo", "--types=x", "--typed", "y"]).1, "y");
    }

    #[test]
    fn new_treats_empty_flag_as_absent() {
        let inv = Invocation::new(Some("demo".into()), Some(String::new()), Some("Web".into()))
            .unwrap();
        assert_eq!(inv.project_type(), "web");
    }

    #[test]
    fn display_includes_type_when_present() {
        assert_eq!(read(&["demo", "x"]).to_string(), "demo (x)");
        assert_eq!(read(&["demo"]).to_string(), "demo");
    }
}
