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

use crate::unit::UnitActiveState;
use std::fmt;

/// Fine grained state of a service unit.
///
/// Only `Dead`, `Running`, `Exited` and `Failed` can be derived from a
/// simple or oneshot process today. The rest belong to the richer lifecycles
/// of forking, notify and dbus services and keep the mapping to
/// [`UnitActiveState`] total.
#[derive(PartialEq, Eq, Debug, Copy, Clone, Default)]
pub enum ServiceState {
    /// not running, no failure recorded
    #[default]
    Dead,
    /// running ExecStartPre
    StartPre,
    /// running ExecStart, main process not up yet
    Start,
    /// running ExecStartPost
    StartPost,
    /// main process is running
    Running,
    /// main process exited cleanly and RemainAfterExit is set
    Exited,
    /// running ExecReload
    Reload,
    /// running ExecStop
    Stop,
    /// waiting for the watchdog abort of the main process
    StopSigabrt,
    /// SIGTERM sent to the main process
    StopSigterm,
    /// SIGKILL sent to the main process
    StopSigkill,
    /// running ExecStopPost
    StopPost,
    /// SIGTERM sent to the remaining processes
    FinalSigterm,
    /// SIGKILL sent to the remaining processes
    FinalSigkill,
    /// the last run did not finish cleanly
    Failed,
    /// waiting to be restarted
    AutoRestart,
}

impl ServiceState {
    /// based on the systemd transition table for service units
    pub fn to_unit_active_state(self) -> UnitActiveState {
        match self {
            ServiceState::Dead => UnitActiveState::InActive,
            ServiceState::Failed => UnitActiveState::Failed,
            ServiceState::Reload => UnitActiveState::Reloading,
            ServiceState::Running | ServiceState::Exited => UnitActiveState::Active,
            ServiceState::Start
            | ServiceState::StartPre
            | ServiceState::StartPost
            | ServiceState::AutoRestart => UnitActiveState::Activating,
            ServiceState::Stop
            | ServiceState::StopSigabrt
            | ServiceState::StopSigterm
            | ServiceState::StopSigkill
            | ServiceState::StopPost
            | ServiceState::FinalSigterm
            | ServiceState::FinalSigkill => UnitActiveState::DeActivating,
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceState::Dead => "dead",
            ServiceState::StartPre => "start-pre",
            ServiceState::Start => "start",
            ServiceState::StartPost => "start-post",
            ServiceState::Running => "running",
            ServiceState::Exited => "exited",
            ServiceState::Reload => "reload",
            ServiceState::Stop => "stop",
            ServiceState::StopSigabrt => "stop-sigabrt",
            ServiceState::StopSigterm => "stop-sigterm",
            ServiceState::StopSigkill => "stop-sigkill",
            ServiceState::StopPost => "stop-post",
            ServiceState::FinalSigterm => "final-sigterm",
            ServiceState::FinalSigkill => "final-sigkill",
            ServiceState::Failed => "failed",
            ServiceState::AutoRestart => "auto-restart",
        };
        f.write_str(s)
    }
}
