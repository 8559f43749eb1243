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

use super::kind::{JobId, JobKind, JobStage};
use super::relation::JobRelations;
use crate::error::*;
use crate::unit::UnitX;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;

/// Signal of one run of a job, alive from the start to the end of the run.
#[derive(Debug)]
pub(super) struct CompletionToken {
    tx: watch::Sender<bool>,
}

impl CompletionToken {
    fn new() -> Self {
        let (tx, _) = watch::channel(false);
        CompletionToken { tx }
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// wake every waiter, present and future subscribers alike
    fn release(self) {
        self.tx.send_replace(true);
    }
}

/// What became of a job, as seen by the jobs requiring it.
#[derive(Clone, Debug)]
pub(super) enum JobFate {
    /// not finished yet
    Pending,
    /// ran to success or failure
    Finished,
    /// folded into another job before it ran
    Merged(Arc<Job>),
    /// dropped from the manager before it ran
    Removed,
}

/// The mutable part of a job.
#[derive(Debug)]
pub(crate) struct JobData {
    pub(super) kind: JobKind,
    pub(super) relations: JobRelations,
    executed: bool,
    result: Option<Error>,
    token: Option<CompletionToken>,
    /* merged or removed, it will never run */
    retired: bool,
}

impl JobData {
    pub(super) fn new(kind: JobKind) -> Self {
        JobData {
            kind,
            relations: JobRelations::new(),
            executed: false,
            result: None,
            token: None,
            retired: false,
        }
    }

    /// Mark a waiting job as never to be run.
    pub(super) fn retire(&mut self) {
        self.retired = true;
    }

    pub(super) fn stage(&self) -> JobStage {
        if self.token.is_some() {
            JobStage::Running
        } else if !self.executed {
            JobStage::Waiting
        } else if self.result.is_none() {
            JobStage::Success
        } else {
            JobStage::Failed
        }
    }
}

/// One scheduled operation on one unit.
pub struct Job {
    id: JobId,
    unit: Arc<UnitX>,
    data: Mutex<JobData>,
    fate: watch::Sender<JobFate>,
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("unit", &self.unit.id())
            .field("kind", &data.kind)
            .field("stage", &data.stage())
            .finish()
    }
}

impl Job {
    pub(super) fn new(id: JobId, kind: JobKind, unit: &Arc<UnitX>) -> Job {
        let (fate, _) = watch::channel(JobFate::Pending);
        Job {
            id,
            unit: Arc::clone(unit),
            data: Mutex::new(JobData::new(kind)),
            fate,
        }
    }

    ///
    pub fn id(&self) -> JobId {
        self.id
    }

    ///
    pub fn unit(&self) -> &Arc<UnitX> {
        &self.unit
    }

    ///
    pub fn kind(&self) -> JobKind {
        self.data().kind
    }

    /// waiting, running, success or failed
    pub fn stage(&self) -> JobStage {
        self.data().stage()
    }

    ///
    pub fn is_running(&self) -> bool {
        self.stage() == JobStage::Running
    }

    ///
    pub fn success(&self) -> bool {
        self.stage() == JobStage::Success
    }

    ///
    pub fn failed(&self) -> bool {
        self.stage() == JobStage::Failed
    }

    /// the error the job finished with, if any
    pub fn result(&self) -> Option<Error> {
        self.data().result.clone()
    }

    /// a snapshot of the relation sets
    pub fn relations(&self) -> JobRelations {
        self.data().relations.clone()
    }

    /// Nobody wants, requires or conflicts this job: it can be dropped
    /// without breaking anybody's contract.
    pub fn is_orphan(&self) -> bool {
        self.data().relations.is_orphan()
    }

    /// Wait for the current run to end.
    ///
    /// Returns at once when the job is not running, including when it has
    /// not been started yet; check [`Job::stage`] to tell those apart.
    pub async fn wait(&self) {
        let rx = match &self.data().token {
            Some(token) => token.subscribe(),
            None => return,
        };
        wait_true(rx).await;
    }

    /// Wait until the job is finished, merged or removed.
    pub(super) async fn wait_fate(&self) -> JobFate {
        let mut rx = self.fate.subscribe();
        let fate = match rx.wait_for(|fate| !matches!(fate, JobFate::Pending)).await {
            Ok(fate) => (*fate).clone(),
            Err(_) => JobFate::Removed,
        };
        fate
    }

    /// Wait until the job finished, following it through merges.
    ///
    /// Returns the job that finished in its place, None if it was removed
    /// before it ran.
    pub(super) async fn wait_finished(self: &Arc<Self>) -> Option<Arc<Job>> {
        let mut job = Arc::clone(self);
        loop {
            match job.wait_fate().await {
                JobFate::Finished => return Some(job),
                JobFate::Merged(target) => {
                    log::debug!("Job {} was merged into job {}", job.id, target.id);
                    job = target;
                }
                JobFate::Pending | JobFate::Removed => return None,
            }
        }
    }

    /// Publish the fate of a job retired by [`JobData::retire`].
    pub(super) fn announce(&self, fate: JobFate) {
        self.fate.send_replace(fate);
    }

    /// Retire the job if it has not begun. Returns false if it has.
    pub(super) fn retire(&self) -> bool {
        {
            let mut data = self.data();
            if data.retired || data.stage() != JobStage::Waiting {
                return false;
            }
            data.retire();
        }
        self.announce(JobFate::Removed);
        true
    }

    pub(super) fn data(&self) -> MutexGuard<'_, JobData> {
        self.data.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// waiting -> running
    pub(super) fn begin(&self) -> Result<()> {
        let mut data = self.data();
        if data.retired {
            return Err(Error::JobNotFound { id: self.id });
        }
        if data.stage() != JobStage::Waiting {
            return Err(Error::JobNotWaiting { id: self.id });
        }
        data.token = Some(CompletionToken::new());
        self.unit.attach_job(self.id);
        Ok(())
    }

    /// running -> success | failed
    ///
    /// The unit forgets the job before the token is released.
    pub(super) fn finish(&self, ret: &Result<()>) {
        let token = {
            let mut data = self.data();
            self.unit.detach_job(self.id);
            data.executed = true;
            data.result = ret.as_ref().err().cloned();
            data.token.take()
        };

        if let Some(token) = token {
            token.release();
        }
        self.fate.send_replace(JobFate::Finished);
    }

    /// Invoke the operation of the job on its unit.
    pub(super) async fn execute(&self) -> Result<()> {
        let kind = self.kind();
        log::debug!("Executing job {}: {} {}", self.id, kind, self.unit.id());
        job_trigger_unit(&self.unit, kind).await
    }
}

async fn wait_true(mut rx: watch::Receiver<bool>) {
    /* the sender lives in the job, dropping it means the job is gone */
    let _ = rx.wait_for(|done| *done).await;
}

async fn job_trigger_unit(unit: &UnitX, kind: JobKind) -> Result<()> {
    match kind {
        JobKind::Start => unit.start().await,
        JobKind::Stop => unit.stop().await,
        JobKind::Reload => unit.reload().await,
        JobKind::Restart => {
            unit.stop().await?;
            unit.start().await
        }
    }
}
