//! Command dispatch — validate the arguments, then hand control to the
//! external device controller.
//!
//! The [`Controller`] trait is the seam between argument handling and the
//! program that actually talks to devices. [`ProcessController`] runs the
//! configured executable; [`mock::MockController`] records calls for tests.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use serde::Serialize;

use crate::config::{Config, HandOff};
use crate::error::{Result, SwitchError, exit_codes};
use crate::name::{DeviceKey, KeyStyle};
use crate::state::{StateCommand, StateTokens};

/// A validated (device, state) pair, built per invocation and consumed by
/// [`Dispatcher::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchRequest {
    pub device: DeviceKey,
    pub state: StateCommand,
}

impl DispatchRequest {
    /// Validate raw arguments.
    ///
    /// Missing or blank arguments are [`SwitchError::Usage`]; a name made only
    /// of separators or an unknown state token is [`SwitchError::InvalidArgument`].
    pub fn parse(device: Option<&str>, state: Option<&str>) -> Result<Self> {
        let device = device.map(str::trim).filter(|s| !s.is_empty());
        let state = state.map(str::trim).filter(|s| !s.is_empty());

        let (device, state) = match (device, state) {
            (Some(d), Some(s)) => (d, s),
            (None, None) => {
                return Err(SwitchError::Usage(
                    "missing device name and state".into(),
                ));
            }
            (None, Some(_)) => return Err(SwitchError::Usage("missing device name".into())),
            (Some(_), None) => return Err(SwitchError::Usage("missing state".into())),
        };

        Ok(DispatchRequest {
            device: DeviceKey::parse(device)?,
            state: state.parse()?,
        })
    }
}

/// Something that can carry out a [`DispatchRequest`].
pub trait Controller {
    /// Hand the request to the device controller and return the exit status
    /// to propagate. `0` means success.
    ///
    /// Implementations that replace the process image only return on failure.
    fn invoke(&self, request: &DispatchRequest) -> Result<i32>;
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn invoke(&self, request: &DispatchRequest) -> Result<i32> {
        (**self).invoke(request)
    }
}

/// Runs the configured device-control executable:
/// `program args... <device_flag> <key> <command_flag> <state>`.
#[derive(Debug, Clone)]
pub struct ProcessController {
    program: String,
    args: Vec<String>,
    device_flag: String,
    command_flag: String,
    key_style: KeyStyle,
    state_tokens: StateTokens,
    registry: Option<(String, PathBuf)>,
    hand_off: HandOff,
}

impl ProcessController {
    pub fn from_config(config: &Config) -> Self {
        ProcessController {
            program: config.program.trim().to_string(),
            args: config.args.clone(),
            device_flag: config.device_flag.clone(),
            command_flag: config.command_flag.clone(),
            key_style: config.device_key,
            state_tokens: config.state_tokens,
            registry: config
                .registry()
                .map(|path| (config.registry_env.clone(), path)),
            hand_off: config.hand_off,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program (program name excluded).
    pub fn argv(&self, request: &DispatchRequest) -> Vec<String> {
        let mut argv = self.args.clone();
        argv.push(self.device_flag.clone());
        argv.push(request.device.render(self.key_style));
        argv.push(self.command_flag.clone());
        argv.push(request.state.render(self.state_tokens).to_string());
        argv
    }

    /// Environment additions for the child process.
    pub fn env(&self) -> Vec<(String, PathBuf)> {
        self.registry.iter().cloned().collect()
    }

    /// Build the process invocation without running it.
    pub fn command(&self, request: &DispatchRequest) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.argv(request));
        for (key, value) in self.env() {
            cmd.env(key, value);
        }
        cmd
    }

    fn unavailable(&self, source: std::io::Error) -> SwitchError {
        SwitchError::CollaboratorUnavailable {
            program: self.program.clone(),
            source,
        }
    }

    #[cfg(unix)]
    fn exec(&self, mut cmd: Command) -> Result<i32> {
        use std::os::unix::process::CommandExt;
        // exec() only returns if the image could not be replaced.
        let err = cmd.exec();
        Err(self.unavailable(err))
    }

    #[cfg(not(unix))]
    fn exec(&self, cmd: Command) -> Result<i32> {
        self.wait(cmd)
    }

    fn wait(&self, mut cmd: Command) -> Result<i32> {
        let status = cmd.status().map_err(|e| self.unavailable(e))?;
        Ok(exit_status_code(status))
    }
}

impl Controller for ProcessController {
    fn invoke(&self, request: &DispatchRequest) -> Result<i32> {
        let cmd = self.command(request);
        log::debug!("invoking device controller ({}): {cmd:?}", self.hand_off);
        match self.hand_off {
            HandOff::Exec => self.exec(cmd),
            HandOff::Wait => self.wait(cmd),
        }
    }
}

/// Map a child's exit status to the status this process should exit with.
/// Death by signal `n` becomes `128 + n`, as shells report it.
pub fn exit_status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    exit_codes::GENERAL_ERROR
}

/// Validates arguments and forwards them to a [`Controller`].
pub struct Dispatcher<C> {
    controller: C,
}

impl Dispatcher<ProcessController> {
    /// Dispatcher backed by the executable described in `config`.
    pub fn from_config(config: &Config) -> Self {
        Dispatcher::new(ProcessController::from_config(config))
    }
}

impl<C: Controller> Dispatcher<C> {
    pub fn new(controller: C) -> Self {
        Dispatcher { controller }
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Print the progress line to `out`, then invoke the controller.
    ///
    /// A non-zero controller status comes back as
    /// [`SwitchError::CollaboratorFailure`] carrying that status.
    pub fn dispatch(&self, request: &DispatchRequest, out: &mut dyn Write) -> Result<()> {
        writeln!(
            out,
            "Turning '{}' {} ...",
            request.device,
            request.state.canonical()
        )?;
        // Output must be on its way before the process image is replaced.
        out.flush()?;

        let status = self.controller.invoke(request)?;
        if status == exit_codes::SUCCESS {
            Ok(())
        } else {
            log::debug!("device controller exited with status {status}");
            Err(SwitchError::CollaboratorFailure { status })
        }
    }

    /// Validate raw arguments and dispatch them.
    pub fn run(&self, device: Option<&str>, state: Option<&str>, out: &mut dyn Write) -> Result<()> {
        let request = DispatchRequest::parse(device, state)?;
        self.dispatch(&request, out)
    }
}

/// In-memory controller for unit and integration tests.
pub mod mock {
    use super::*;
    use std::cell::RefCell;

    /// Records every request; answers with a fixed exit status, or with
    /// [`SwitchError::CollaboratorUnavailable`] when built with
    /// [`MockController::unavailable`].
    pub struct MockController {
        /// Requests seen so far, in order.
        pub calls: RefCell<Vec<DispatchRequest>>,
        status: i32,
        missing: bool,
    }

    impl MockController {
        pub fn new() -> Self {
            Self::with_status(exit_codes::SUCCESS)
        }

        pub fn with_status(status: i32) -> Self {
            MockController {
                calls: RefCell::new(Vec::new()),
                status,
                missing: false,
            }
        }

        pub fn unavailable() -> Self {
            MockController {
                missing: true,
                ..Self::new()
            }
        }
    }

    impl Default for MockController {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Controller for MockController {
        fn invoke(&self, request: &DispatchRequest) -> Result<i32> {
            self.calls.borrow_mut().push(request.clone());
            if self.missing {
                return Err(SwitchError::CollaboratorUnavailable {
                    program: "mock".into(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
                });
            }
            Ok(self.status)
        }
    }
}
