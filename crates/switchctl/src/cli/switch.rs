//! Switch a device on or off, or show what would run (`--dry-run`).

use std::collections::BTreeMap;
use std::io::{self, Write};

use super::{
    Config, Controller, DispatchRequest, Dispatcher, DryRunOutput, ProcessController, Result,
};

pub(super) fn cmd_switch(
    config: &Config,
    request: &DispatchRequest,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let controller = ProcessController::from_config(config);

    if dry_run {
        let dispatcher = Dispatcher::new(DryRun {
            inner: controller,
            json,
        });
        // Keep stdout a single JSON document.
        let mut out: Box<dyn Write> = if json {
            Box::new(io::sink())
        } else {
            Box::new(io::stdout())
        };
        return dispatcher.dispatch(request, &mut *out);
    }

    Dispatcher::new(controller).dispatch(request, &mut io::stdout())
}

/// Prints the command the wrapped controller would run, then reports success.
struct DryRun {
    inner: ProcessController,
    json: bool,
}

impl Controller for DryRun {
    fn invoke(&self, request: &DispatchRequest) -> Result<i32> {
        let argv = self.inner.argv(request);
        let env = self.inner.env();

        if self.json {
            let output = DryRunOutput {
                request,
                program: self.inner.program(),
                args: &argv,
                env: env
                    .iter()
                    .map(|(k, v)| (k.clone(), v.display().to_string()))
                    .collect::<BTreeMap<_, _>>(),
            };
            let text = serde_json::to_string_pretty(&output).map_err(io::Error::other)?;
            println!("{text}");
        } else {
            let mut words: Vec<String> = env
                .iter()
                .map(|(k, v)| format!("{k}={}", shell_quote(&v.display().to_string())))
                .collect();
            words.push(shell_quote(self.inner.program()));
            words.extend(argv.iter().map(|a| shell_quote(a)));
            println!("{}", words.join(" "));
        }
        Ok(0)
    }
}

/// Quote `word` for a POSIX shell when it contains anything beyond a safe set.
fn shell_quote(word: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c);
    if !word.is_empty() && word.chars().all(safe) {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_quote_leaves_plain_words() {
        assert_eq!(shell_quote("--device"), "--device");
        assert_eq!(shell_quote("/opt/wemo/cli.py"), "/opt/wemo/cli.py");
    }

    #[test]
    fn shell_quote_wraps_spaces() {
        assert_eq!(shell_quote("my desk lamp"), "'my desk lamp'");
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("bob's lamp"), r"'bob'\''s lamp'");
    }

    #[test]
    fn shell_quote_empty() {
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn dry_run_reports_success_without_spawning() {
        let config = Config {
            program: "/nonexistent/controller".into(),
            ..Config::default()
        };
        let dry = DryRun {
            inner: ProcessController::from_config(&config),
            json: false,
        };
        let request = DispatchRequest::parse(Some("lamp"), Some("on")).unwrap();
        assert_eq!(dry.invoke(&request).unwrap(), 0);
    }

    #[test]
    fn cmd_switch_dry_run_succeeds() {
        let request = DispatchRequest::parse(Some("Desk Lamp"), Some("off")).unwrap();
        let result = cmd_switch(&Config::default(), &request, true, false);
        assert!(result.is_ok());
    }

    #[test]
    fn cmd_switch_dry_run_json_succeeds() {
        let request = DispatchRequest::parse(Some("Desk Lamp"), Some("enable")).unwrap();
        let result = cmd_switch(&Config::default(), &request, true, true);
        assert!(result.is_ok());
    }
}
