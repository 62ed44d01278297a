//! Shared error output for the chime CLI.

use serde::Serialize;

use crate::error::Result;

pub const SCHEMA_VERSION: &str = "chime.v1";

pub fn emit_error(command: &str, err: &crate::error::Error, json: bool) -> Result<()> {
    let next_steps = error_next_steps(err);
    let hint = next_steps.first().map(|step| step.as_str());
    if json {
        #[derive(Serialize)]
        struct ErrorBody<'a> {
            message: &'a str,
            code: i32,
            kind: &'static str,
        }

        #[derive(Serialize)]
        struct Envelope<'a> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            error: ErrorBody<'a>,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            next_steps: Vec<String>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            error: ErrorBody {
                message: &err.to_string(),
                code: err.exit_code(),
                kind: error_kind(err),
            },
            next_steps,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    eprintln!("error: {err}");
    if let Some(hint) = hint {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

fn error_kind(err: &crate::error::Error) -> &'static str {
    match err.exit_code() {
        2 => "user_error",
        3 => "role_blocked",
        _ => "operation_failed",
    }
}

fn error_next_steps(err: &crate::error::Error) -> Vec<String> {
    use crate::error::Error;

    match err {
        Error::InvalidDuration { .. } => {
            vec!["durations use HH:MM, e.g. 01:30".to_string()]
        }
        Error::InvalidConfig(_) | Error::TomlParse(_) => {
            vec!["fix .chime.toml then retry".to_string()]
        }
        Error::RoleDenied { .. } => {
            vec!["start with --role parent, or press 't' on the board".to_string()]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn kinds_follow_exit_codes() {
        assert_eq!(error_kind(&Error::InvalidArgument("x".to_string())), "user_error");
        assert_eq!(
            error_kind(&Error::RoleDenied {
                role: "child".to_string(),
                action: "delete tasks".to_string(),
            }),
            "role_blocked"
        );
        assert_eq!(
            error_kind(&Error::OperationFailed("x".to_string())),
            "operation_failed"
        );
    }

    #[test]
    fn duration_errors_hint_at_format() {
        let err = Error::InvalidDuration {
            input: "90".to_string(),
            reason: "expected HH:MM".to_string(),
        };
        let steps = error_next_steps(&err);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].contains("HH:MM"));
    }
}
