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

//! Jobs: scheduled operations on units, their graph and their runner.
mod entry;
mod kind;
mod manager;
mod merge;
mod relation;

pub use entry::Job;
pub use kind::{JobId, JobKind, JobStage};
pub use manager::{JobInfo, JobManager};
pub use merge::job_merge_kind;
pub use relation::{JobRelation, JobRelations};
