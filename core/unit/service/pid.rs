// Copyright (c) 2022 Huawei Technologies Co.,Ltd. All rights reserved.
//
// sysMaster is licensed under Mulan PSL v2.
// You can use this software according to the terms and conditions of the Mulan
// PSL v2.
// You may obtain a copy of Mulan PSL v2 at:
//         http://license.coscl.org.cn/MulanPSL2
// THIS SOFTWARE IS PROVIDED ON AN "AS IS" BASIS, WITHOUT WARRANTIES OF ANY
// KIND, EITHER EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO
// NON-INFRINGEMENT, MERCHANTABILITY OR FIT FOR A PARTICULAR PURPOSE.
// See the Mulan PSL v2 for more details.

//! The process behind a service unit.
use crate::error::*;
use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::process::Command;
use tokio::sync::watch;

type ExitWatch = watch::Receiver<Option<ExitStatus>>;

#[derive(Clone, Debug)]
enum ProcessState {
    /// never launched
    Idle,
    /// launched, no exit status collected yet
    Running { pid: Option<Pid>, exit: ExitWatch },
    /// exit status collected
    Exited(ExitStatus),
}

/// At most one OS process of a service unit.
///
/// The command line is fixed when the definition is loaded; launching it is
/// deferred to [`ServicePid::start`] or [`ServicePid::run`].
#[derive(Debug)]
pub(super) struct ServicePid {
    path: String,
    args: Vec<String>,
    state: Arc<Mutex<ProcessState>>,
}

impl ServicePid {
    /// `cmdline` is split on whitespace, the first token is the executable.
    pub(super) fn new(cmdline: &str) -> Option<ServicePid> {
        let mut fields = cmdline.split_whitespace();
        let path = fields.next()?.to_string();
        Some(ServicePid {
            path,
            args: fields.map(|s| s.to_string()).collect(),
            state: Arc::new(Mutex::new(ProcessState::Idle)),
        })
    }

    pub(super) fn cmdline(&self) -> String {
        let mut cmd = self.path.clone();
        for arg in &self.args {
            cmd.push(' ');
            cmd.push_str(arg);
        }
        cmd
    }

    fn state(&self) -> MutexGuard<'_, ProcessState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// whether a process was ever launched
    pub(super) fn launched(&self) -> bool {
        !matches!(*self.state(), ProcessState::Idle)
    }

    /// the exit status, once the process terminated
    pub(super) fn exit_status(&self) -> Option<ExitStatus> {
        match *self.state() {
            ProcessState::Exited(status) => Some(status),
            _ => None,
        }
    }

    /// whether the process was launched and has not been reaped yet
    pub(super) fn is_running(&self) -> bool {
        matches!(*self.state(), ProcessState::Running { .. })
    }

    /// Spawn the process and a task collecting its exit status.
    ///
    /// The state lock is held from the check until `Running` is stored, so
    /// concurrent callers launch a single process.
    fn launch(&self) -> Result<ExitWatch> {
        let mut state = self.state();
        if let ProcessState::Running { exit, .. } = &*state {
            log::warn!("'{}' is still running, not launching it again", self.cmdline());
            return Ok(exit.clone());
        }

        let mut child = Command::new(&self.path)
            .args(&self.args)
            .stdin(Stdio::null())
            .spawn()
            .context(SpawnSnafu {
                cmd: self.cmdline(),
            })?;

        let pid = child.id().map(|id| Pid::from_raw(id as i32));
        let (tx, rx) = watch::channel(None);
        *state = ProcessState::Running {
            pid,
            exit: rx.clone(),
        };
        drop(state);
        log::debug!("Spawned '{}' as {:?}", self.cmdline(), pid);

        let state = Arc::clone(&self.state);
        let cmd = self.cmdline();
        tokio::spawn(async move {
            let status = match child.wait().await {
                Ok(status) => status,
                Err(e) => {
                    log::error!("Failed to wait for '{}': {}", cmd, e);
                    /* report it like exit code 1 */
                    ExitStatus::from_raw(1 << 8)
                }
            };
            log::debug!("'{}' terminated: {}", cmd, status);
            *state.lock().unwrap_or_else(|e| e.into_inner()) = ProcessState::Exited(status);
            let _ = tx.send(Some(status));
        });

        Ok(rx)
    }

    /// Launch without waiting for the process to finish.
    ///
    /// Only a launch failure is reported, not the outcome of the process.
    pub(super) fn start(&self) -> Result<()> {
        self.launch().map(|_| ())
    }

    /// Launch and wait until the process finished.
    pub(super) async fn run(&self) -> Result<()> {
        let exit = self.launch()?;
        let status = wait_exit(exit).await;
        if status.success() {
            return Ok(());
        }
        ExitStatusSnafu {
            cmd: self.cmdline(),
            status,
        }
        .fail()
    }

    /// Kill the process with SIGKILL and wait for it to be reaped.
    pub(super) async fn kill(&self) -> Result<()> {
        let (pid, exit) = match &*self.state() {
            ProcessState::Idle => return Err(Error::NotStarted),
            ProcessState::Exited(_) => return Ok(()),
            ProcessState::Running { pid, exit } => (*pid, exit.clone()),
        };

        if let Some(pid) = pid {
            match signal::kill(pid, Signal::SIGKILL) {
                /* it exited on its own meanwhile */
                Ok(()) | Err(Errno::ESRCH) => {}
                Err(e) => return Err(Error::Nix { source: e }),
            }
        }
        wait_exit(exit).await;
        Ok(())
    }
}

async fn wait_exit(mut exit: ExitWatch) -> ExitStatus {
    match exit.wait_for(|status| status.is_some()).await {
        Ok(status) => {
            let status = *status;
            status.unwrap_or_else(|| ExitStatus::from_raw(1 << 8))
        }
        /* the collecting task is gone without a status */
        Err(_) => ExitStatus::from_raw(1 << 8),
    }
}

/// Run a whole command line to completion.
pub(super) async fn run_cmdline(cmdline: &str) -> Result<()> {
    match ServicePid::new(cmdline) {
        Some(pid) => pid.run().await,
        None => Err(Error::NotSet),
    }
}
