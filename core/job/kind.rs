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

use std::fmt;

/// Stable identifier of a job in the manager's arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct JobId(u64);

impl From<u64> for JobId {
    fn from(v: u64) -> Self {
        JobId(v)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The operation a job performs on its unit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum JobKind {
    ///
    Start,
    ///
    Stop,
    ///
    Reload,
    /// stop, then start if stopping succeeded
    Restart,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobKind::Start => "start",
            JobKind::Stop => "stop",
            JobKind::Reload => "reload",
            JobKind::Restart => "restart",
        };
        write!(f, "{}", s)
    }
}

/// Where a job is in its life; derived from the job's data, never stored.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum JobStage {
    /// not executed yet
    Waiting,
    /// holds a live completion token
    Running,
    /// executed, no error recorded
    Success,
    /// executed with an error
    Failed,
}

impl JobStage {
    /// success or failed
    pub fn is_end(self) -> bool {
        matches!(self, JobStage::Success | JobStage::Failed)
    }
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStage::Waiting => "waiting",
            JobStage::Running => "running",
            JobStage::Success => "success",
            JobStage::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(JobKind::Restart.to_string(), "restart");
        assert_eq!(JobStage::Waiting.to_string(), "waiting");
        assert_eq!(JobId::from(42).to_string(), "42");
        assert!(JobId::from(1) < JobId::from(2));
    }

    #[test]
    fn test_stage_end() {
        assert!(!JobStage::Waiting.is_end());
        assert!(!JobStage::Running.is_end());
        assert!(JobStage::Success.is_end());
        assert!(JobStage::Failed.is_end());
    }
}
