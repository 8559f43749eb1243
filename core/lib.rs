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

//! sysjob: the job execution core of a service manager.
//!
//! A [`job::JobManager`] owns jobs (start, stop, reload, restart) against
//! [`unit::UnitX`] units, wires them into a dependency graph, merges
//! compatible pending jobs and runs each job once its required jobs have
//! finished. Units derive their activation state from the process they
//! manage; [`unit::ServiceUnit`] is the only unit kind so far.
pub mod config;
pub mod error;
pub mod job;
pub mod unit;

pub use config::ManagerConfig;
pub use error::{Error, MultiError, Result};
pub use job::{Job, JobId, JobInfo, JobKind, JobManager, JobRelation, JobStage};
pub use unit::{ServiceUnit, SubUnit, UnitActiveState, UnitX};
