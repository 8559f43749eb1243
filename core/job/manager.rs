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

//! The job arena: graph wiring, running, merging and ordering of jobs.
use super::entry::{Job, JobFate};
use super::kind::{JobId, JobKind, JobStage};
use super::merge::job_merge;
use super::relation::JobRelation;
use crate::config::ManagerConfig;
use crate::error::*;
use crate::unit::UnitX;
use futures::future::join_all;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// A point-in-time view of a job, for status output.
#[derive(Debug, Clone)]
pub struct JobInfo {
    ///
    pub id: JobId,
    /// name of the unit the job acts on
    pub unit: String,
    ///
    pub kind: JobKind,
    ///
    pub stage: JobStage,
    /// the error the job finished with
    pub result: Option<Error>,
}

impl fmt::Display for JobInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.id, self.unit, self.kind, self.stage)?;
        if let Some(e) = &self.result {
            write!(f, " ({})", e)?;
        }
        Ok(())
    }
}

/// Owner of every job, addressed by [`JobId`].
///
/// Edges between jobs are stored as ids on both ends, so a job never holds a
/// reference to another job.
pub struct JobManager {
    jobs: RwLock<HashMap<JobId, Arc<Job>>>,
    next_id: AtomicU64,
    timeout_sec: u64,
}

impl JobManager {
    ///
    pub fn new(config: &ManagerConfig) -> JobManager {
        JobManager {
            jobs: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            timeout_sec: config.Manager.DefaultJobTimeoutSec,
        }
    }

    /// Create a waiting job with no relations.
    pub fn new_job(&self, kind: JobKind, unit: &Arc<UnitX>) -> Arc<Job> {
        let id = JobId::from(self.next_id.fetch_add(1, Ordering::Relaxed));
        let job = Arc::new(Job::new(id, kind, unit));
        log::debug!("New job {}: {} {}", id, kind, unit.id());
        self.jobs_mut().insert(id, Arc::clone(&job));
        job
    }

    ///
    pub fn get(&self, id: JobId) -> Option<Arc<Job>> {
        self.jobs().get(&id).cloned()
    }

    fn job(&self, id: JobId) -> Result<Arc<Job>> {
        self.get(id).ok_or(Error::JobNotFound { id })
    }

    ///
    pub fn len(&self) -> usize {
        self.jobs().len()
    }

    ///
    pub fn is_empty(&self) -> bool {
        self.jobs().is_empty()
    }

    /// Record `from --relation--> to` and the inverse edge on `to`.
    pub fn add_relation(&self, from: JobId, relation: JobRelation, to: JobId) -> Result<()> {
        if from == to {
            return Err(Error::SelfRelation { id: from });
        }

        let jobs = self.jobs_mut();
        let source = jobs.get(&from).ok_or(Error::JobNotFound { id: from })?;
        let target = jobs.get(&to).ok_or(Error::JobNotFound { id: to })?;
        source.data().relations.insert(relation, to);
        target.data().relations.insert(relation.inverse(), from);
        Ok(())
    }

    ///
    pub fn state(&self, id: JobId) -> Result<JobStage> {
        Ok(self.job(id)?.stage())
    }

    ///
    pub fn is_orphan(&self, id: JobId) -> Result<bool> {
        Ok(self.job(id)?.is_orphan())
    }

    ///
    pub fn info(&self, id: JobId) -> Result<JobInfo> {
        let job = self.job(id)?;
        Ok(JobInfo {
            id,
            unit: job.unit().id().to_string(),
            kind: job.kind(),
            stage: job.stage(),
            result: job.result(),
        })
    }

    /// Run a waiting job to its end.
    ///
    /// Every required job is waited for concurrently; if any of them fails,
    /// the operation of this job is skipped and it fails with
    /// [`Error::DependencyFailed`]. Wanted jobs are never waited for.
    pub async fn run(&self, id: JobId) -> Result<()> {
        let job = self.job(id)?;
        job.begin()?;
        log::debug!("Running job {}: {} {}", id, job.kind(), job.unit().id());

        let ret = match self.wait_requires(&job).await {
            Ok(()) => self.execute(&job).await,
            Err(e) => Err(e),
        };

        job.finish(&ret);
        log::debug!("Job {} finished: {}", id, job.stage());
        ret
    }

    async fn wait_requires(&self, job: &Job) -> Result<()> {
        let requires: Vec<Arc<Job>> = job
            .relations()
            .get(JobRelation::Requires)
            .iter()
            .filter_map(|dep| self.get(*dep))
            .collect();
        if requires.is_empty() {
            return Ok(());
        }

        log::debug!(
            "Job {} waiting for {} required job(s)",
            job.id(),
            requires.len()
        );
        let done = join_all(requires.iter().map(|dep| dep.wait_finished())).await;
        log::debug!("Dependencies of job {} finished", job.id());

        requires
            .iter()
            .zip(done)
            .fold(Ok(()), |acc, (dep, done)| match done {
                Some(done) if done.success() => acc,
                Some(done) => {
                    log::error!(
                        "{}: {} failed to {}",
                        job.unit().id(),
                        done.unit().id(),
                        done.kind()
                    );
                    acc.and(Err(Error::DependencyFailed {
                        dep: done.unit().id().to_string(),
                    }))
                }
                None => {
                    log::error!(
                        "{}: required job {} of {} was removed before it ran",
                        job.unit().id(),
                        dep.id(),
                        dep.unit().id()
                    );
                    acc.and(Err(Error::DependencyFailed {
                        dep: dep.unit().id().to_string(),
                    }))
                }
            })
    }

    async fn execute(&self, job: &Job) -> Result<()> {
        if self.timeout_sec == 0 {
            return job.execute().await;
        }

        let sec = self.timeout_sec;
        match tokio::time::timeout(Duration::from_secs(sec), job.execute()).await {
            Ok(ret) => ret,
            Err(_) => {
                log::error!(
                    "{}: job {} ({}) timed out after {}s",
                    job.unit().id(),
                    job.id(),
                    job.kind(),
                    sec
                );
                Err(Error::Timeout { sec })
            }
        }
    }

    /// Wait for the current run of the job, see [`Job::wait`].
    pub async fn wait(&self, id: JobId) -> Result<()> {
        self.job(id)?.wait().await;
        Ok(())
    }

    /// Merge the waiting job `incoming` into the waiting job `existing` of
    /// the same unit.
    ///
    /// Edges pointing at `incoming` are moved to `existing` and `incoming`
    /// leaves the arena. Jobs already waiting for `incoming` wait for
    /// `existing` instead. When the kinds do not merge nothing changes.
    pub fn merge(&self, existing: JobId, incoming: JobId) -> Result<()> {
        if existing == incoming {
            return Err(Error::SelfRelation { id: existing });
        }

        let mut jobs = self.jobs_mut();
        let target = jobs
            .get(&existing)
            .cloned()
            .ok_or(Error::JobNotFound { id: existing })?;
        let source = jobs
            .get(&incoming)
            .cloned()
            .ok_or(Error::JobNotFound { id: incoming })?;
        if !Arc::ptr_eq(target.unit(), source.unit()) {
            return Err(Error::UnitMismatch {
                a: existing,
                b: incoming,
            });
        }

        let peers = {
            let mut t_data = target.data();
            let mut s_data = source.data();
            for (job, stage) in [(existing, t_data.stage()), (incoming, s_data.stage())] {
                if stage != JobStage::Waiting {
                    return Err(Error::JobNotWaiting { id: job });
                }
            }

            job_merge(&mut t_data, &s_data)?;
            t_data.relations.detach(incoming);
            t_data.relations.detach(existing);
            s_data.retire();
            s_data.relations.peers()
        };

        for peer in peers.iter().filter(|p| **p != existing) {
            if let Some(job) = jobs.get(peer) {
                job.data().relations.replace(incoming, existing, *peer);
            }
        }
        jobs.remove(&incoming);
        source.announce(JobFate::Merged(Arc::clone(&target)));
        log::debug!(
            "Merged job {} into job {}: {} {}",
            incoming,
            existing,
            target.kind(),
            target.unit().id()
        );
        Ok(())
    }

    /// Drop a job from the arena together with every edge to it.
    ///
    /// A job that has not begun will never run; jobs requiring it fail. A
    /// running job still runs to its end.
    pub fn remove(&self, id: JobId) -> Option<Arc<Job>> {
        let mut jobs = self.jobs_mut();
        let job = jobs.remove(&id)?;
        if !job.retire() {
            log::debug!("Removed job {} is not waiting, it runs to its end", id);
        }
        for peer in job.relations().peers() {
            if let Some(p) = jobs.get(&peer) {
                p.data().relations.detach(id);
            }
        }
        log::debug!("Removed job {}", id);
        Some(job)
    }

    /// All waiting jobs in an order honoring their before/after hints, ties
    /// broken by id.
    pub fn order(&self) -> Result<Vec<JobId>> {
        let waiting: HashMap<JobId, Arc<Job>> = self
            .jobs()
            .iter()
            .filter(|(_, job)| job.stage() == JobStage::Waiting)
            .map(|(id, job)| (*id, Arc::clone(job)))
            .collect();

        /* (first, second) */
        let mut edges: HashSet<(JobId, JobId)> = HashSet::new();
        for (id, job) in waiting.iter() {
            let relations = job.relations();
            for other in relations.get(JobRelation::Before) {
                if waiting.contains_key(other) {
                    edges.insert((*id, *other));
                }
            }
            for other in relations.get(JobRelation::After) {
                if waiting.contains_key(other) {
                    edges.insert((*other, *id));
                }
            }
        }

        let mut indegree: HashMap<JobId, usize> = waiting.keys().map(|id| (*id, 0)).collect();
        for (_, second) in edges.iter() {
            *indegree.entry(*second).or_default() += 1;
        }

        let mut ready: BTreeSet<JobId> = indegree
            .iter()
            .filter(|(_, n)| **n == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut sorted = Vec::with_capacity(waiting.len());
        while let Some(id) = ready.pop_first() {
            sorted.push(id);
            for (_, second) in edges.iter().filter(|(first, _)| *first == id) {
                if let Some(n) = indegree.get_mut(second) {
                    *n -= 1;
                    if *n == 0 {
                        ready.insert(*second);
                    }
                }
            }
        }

        if sorted.len() < waiting.len() {
            let mut ids: Vec<JobId> = indegree
                .into_iter()
                .filter(|(_, n)| *n > 0)
                .map(|(id, _)| id)
                .collect();
            ids.sort();
            return Err(Error::OrderingCycle { ids });
        }
        Ok(sorted)
    }

    /// Run every waiting job as its own task, in [`JobManager::order`], and
    /// collect the outcomes once all are done.
    pub async fn dispatch(self: &Arc<Self>) -> Result<Vec<(JobId, Result<()>)>> {
        let ids = self.order()?;
        log::debug!("Dispatching {} job(s)", ids.len());

        let handles: Vec<_> = ids
            .iter()
            .map(|id| {
                let manager = Arc::clone(self);
                let id = *id;
                tokio::spawn(async move { manager.run(id).await })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(ids.len());
        for (id, handle) in ids.into_iter().zip(join_all(handles).await) {
            match handle {
                Ok(ret) => outcomes.push((id, ret)),
                Err(e) => std::panic::resume_unwind(e.into_panic()),
            }
        }
        Ok(outcomes)
    }

    fn jobs(&self) -> RwLockReadGuard<'_, HashMap<JobId, Arc<Job>>> {
        self.jobs.read().unwrap_or_else(|e| e.into_inner())
    }

    fn jobs_mut(&self) -> RwLockWriteGuard<'_, HashMap<JobId, Arc<Job>>> {
        self.jobs.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::test_utils::{TestUnit, UnitRecorder};
    use std::time::Instant;

    fn prepare_unit(name: &str) -> (Arc<UnitX>, Arc<UnitRecorder>) {
        let (sub, rec) = TestUnit::new();
        (UnitX::new(name, Box::new(sub)), rec)
    }

    fn manager() -> Arc<JobManager> {
        Arc::new(JobManager::new(&ManagerConfig::default()))
    }

    #[tokio::test]
    async fn test_run_without_requires() {
        let jm = manager();
        let (unit, rec) = prepare_unit("a.service");
        let job = jm.new_job(JobKind::Start, &unit);
        assert_eq!(jm.state(job.id()).unwrap(), JobStage::Waiting);

        jm.run(job.id()).await.unwrap();
        assert_eq!(rec.starts(), 1);
        assert!(job.success());
        assert_eq!(unit.job(), None);
        assert!(matches!(
            jm.run(job.id()).await,
            Err(Error::JobNotWaiting { .. })
        ));
        assert_eq!(rec.starts(), 1);
    }

    #[tokio::test]
    async fn test_dependency_failed() {
        let jm = manager();
        let (dep_unit, dep_rec) = prepare_unit("dep.service");
        let (unit, rec) = prepare_unit("app.service");
        dep_rec.set_fail_start(true);

        let dep = jm.new_job(JobKind::Start, &dep_unit);
        let job = jm.new_job(JobKind::Start, &unit);
        jm.add_relation(job.id(), JobRelation::Requires, dep.id())
            .unwrap();

        let runner = {
            let jm = Arc::clone(&jm);
            let id = job.id();
            tokio::spawn(async move { jm.run(id).await })
        };
        assert!(jm.run(dep.id()).await.is_err());

        let err = runner.await.unwrap().unwrap_err();
        assert!(matches!(&err, Error::DependencyFailed { dep } if dep == "dep.service"));
        assert_eq!(rec.starts(), 0);
        assert!(job.failed());
        for _ in 0..3 {
            assert_eq!(jm.state(job.id()).unwrap(), JobStage::Failed);
        }
    }

    #[tokio::test]
    async fn test_wants_not_waited() {
        let jm = manager();
        let (soft_unit, soft_rec) = prepare_unit("soft.service");
        let (unit, rec) = prepare_unit("app.service");
        soft_rec.set_fail_start(true);

        let soft = jm.new_job(JobKind::Start, &soft_unit);
        let job = jm.new_job(JobKind::Start, &unit);
        jm.add_relation(job.id(), JobRelation::Wants, soft.id())
            .unwrap();

        /* the wanted job never runs, yet the job does not block */
        jm.run(job.id()).await.unwrap();
        assert_eq!(rec.starts(), 1);
        assert_eq!(jm.state(soft.id()).unwrap(), JobStage::Waiting);
    }

    #[tokio::test]
    async fn test_requires_all_succeed() {
        let jm = manager();
        let (unit, rec) = prepare_unit("app.service");
        let job = jm.new_job(JobKind::Start, &unit);
        let mut deps = Vec::new();
        for name in ["a.service", "b.service", "c.service"] {
            let (u, p) = prepare_unit(name);
            p.set_delay(100);
            let dep = jm.new_job(JobKind::Start, &u);
            jm.add_relation(job.id(), JobRelation::Requires, dep.id())
                .unwrap();
            deps.push((dep, p));
        }

        let now = Instant::now();
        let outcomes = jm.dispatch().await.unwrap();
        /* the three required jobs overlap */
        assert!(now.elapsed() < Duration::from_millis(250));
        assert_eq!(outcomes.len(), 4);
        assert!(outcomes.iter().all(|(_, ret)| ret.is_ok()));
        assert_eq!(rec.starts(), 1);
        for (dep, p) in deps {
            assert!(dep.success());
            assert_eq!(p.starts(), 1);
        }
    }

    #[tokio::test]
    async fn test_wait() {
        let jm = manager();
        let (unit, rec) = prepare_unit("slow.service");
        rec.set_delay(200);
        let job = jm.new_job(JobKind::Start, &unit);

        /* waiting: returns at once */
        jm.wait(job.id()).await.unwrap();
        assert_eq!(job.stage(), JobStage::Waiting);

        let runner = {
            let jm = Arc::clone(&jm);
            let id = job.id();
            tokio::spawn(async move { jm.run(id).await })
        };
        while job.stage() == JobStage::Waiting {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(job.stage(), JobStage::Running);
        assert_eq!(unit.job(), Some(job.id()));

        jm.wait(job.id()).await.unwrap();
        assert_eq!(job.stage(), JobStage::Success);
        runner.await.unwrap().unwrap();

        let now = Instant::now();
        jm.wait(job.id()).await.unwrap();
        assert!(now.elapsed() < Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_restart_stop_failure() {
        let jm = manager();
        let (unit, rec) = prepare_unit("a.service");
        rec.set_fail_stop(true);
        let job = jm.new_job(JobKind::Restart, &unit);

        assert!(matches!(jm.run(job.id()).await, Err(Error::NotStarted)));
        assert_eq!(rec.stops(), 1);
        assert_eq!(rec.starts(), 0);
        assert!(matches!(
            jm.info(job.id()).unwrap().result,
            Some(Error::NotStarted)
        ));
    }

    #[tokio::test]
    async fn test_timeout() {
        let mut config = ManagerConfig::default();
        config.Manager.DefaultJobTimeoutSec = 1;
        let jm = JobManager::new(&config);
        let (unit, rec) = prepare_unit("hang.service");
        rec.set_delay(3000);
        let job = jm.new_job(JobKind::Stop, &unit);

        assert!(matches!(
            jm.run(job.id()).await,
            Err(Error::Timeout { sec: 1 })
        ));
        assert!(job.failed());
        assert_eq!(rec.stops(), 0);
    }

    #[test]
    fn test_relations_and_orphan() {
        let jm = manager();
        let (a, _) = prepare_unit("a.service");
        let (b, _) = prepare_unit("b.service");
        let ja = jm.new_job(JobKind::Start, &a);
        let jb = jm.new_job(JobKind::Start, &b);
        assert!(jm.is_orphan(jb.id()).unwrap());

        jm.add_relation(ja.id(), JobRelation::Requires, jb.id())
            .unwrap();
        assert!(ja.relations().contains(JobRelation::Requires, jb.id()));
        assert!(jb.relations().contains(JobRelation::RequiredBy, ja.id()));
        assert!(!jm.is_orphan(jb.id()).unwrap());
        assert!(jm.is_orphan(ja.id()).unwrap());

        /* ordering hints do not make anybody depend on the job */
        jm.add_relation(ja.id(), JobRelation::After, jb.id()).unwrap();
        assert!(jb.relations().contains(JobRelation::Before, ja.id()));
        assert!(jm.is_orphan(ja.id()).unwrap());

        assert!(matches!(
            jm.add_relation(ja.id(), JobRelation::Wants, ja.id()),
            Err(Error::SelfRelation { .. })
        ));
        assert!(matches!(
            jm.state(JobId::from(99)),
            Err(Error::JobNotFound { .. })
        ));

        jm.remove(jb.id()).unwrap();
        assert!(ja.relations().peers().is_empty());
        assert_eq!(jm.len(), 1);
    }

    #[test]
    fn test_merge_repoints() {
        let jm = manager();
        let (unit, _) = prepare_unit("a.service");
        let (other, _) = prepare_unit("b.service");
        let existing = jm.new_job(JobKind::Start, &unit);
        let incoming = jm.new_job(JobKind::Reload, &unit);
        let dependent = jm.new_job(JobKind::Start, &other);
        jm.add_relation(dependent.id(), JobRelation::Requires, incoming.id())
            .unwrap();

        jm.merge(existing.id(), incoming.id()).unwrap();
        assert_eq!(existing.kind(), JobKind::Reload);
        assert!(jm.get(incoming.id()).is_none());
        assert!(existing
            .relations()
            .contains(JobRelation::RequiredBy, dependent.id()));
        assert!(dependent
            .relations()
            .contains(JobRelation::Requires, existing.id()));
        assert!(!dependent
            .relations()
            .contains(JobRelation::Requires, incoming.id()));
    }

    async fn running(job: &Job) {
        while job.stage() == JobStage::Waiting {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn test_merge_while_required() {
        let jm = manager();
        let (unit, rec) = prepare_unit("a.service");
        let (other, other_rec) = prepare_unit("b.service");
        let existing = jm.new_job(JobKind::Start, &unit);
        let incoming = jm.new_job(JobKind::Start, &unit);
        let dependent = jm.new_job(JobKind::Start, &other);
        jm.add_relation(dependent.id(), JobRelation::Requires, incoming.id())
            .unwrap();

        let runner = {
            let jm = Arc::clone(&jm);
            let id = dependent.id();
            tokio::spawn(async move { jm.run(id).await })
        };
        running(&dependent).await;

        jm.merge(existing.id(), incoming.id()).unwrap();
        assert!(matches!(
            jm.run(incoming.id()).await,
            Err(Error::JobNotFound { .. })
        ));
        jm.run(existing.id()).await.unwrap();

        tokio::time::timeout(Duration::from_secs(3), runner)
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        assert!(dependent.success());
        assert_eq!(rec.starts(), 1);
        assert_eq!(other_rec.starts(), 1);
    }

    #[tokio::test]
    async fn test_remove_while_required() {
        let jm = manager();
        let (dep_unit, dep_rec) = prepare_unit("dep.service");
        let (unit, rec) = prepare_unit("app.service");
        let dep = jm.new_job(JobKind::Start, &dep_unit);
        let job = jm.new_job(JobKind::Start, &unit);
        jm.add_relation(job.id(), JobRelation::Requires, dep.id())
            .unwrap();

        let runner = {
            let jm = Arc::clone(&jm);
            let id = job.id();
            tokio::spawn(async move { jm.run(id).await })
        };
        running(&job).await;

        jm.remove(dep.id()).unwrap();
        let err = tokio::time::timeout(Duration::from_secs(3), runner)
            .await
            .unwrap()
            .unwrap()
            .unwrap_err();
        assert!(matches!(&err, Error::DependencyFailed { dep } if dep == "dep.service"));
        assert!(job.failed());
        assert_eq!(rec.starts(), 0);
        assert_eq!(dep_rec.starts(), 0);
        assert_eq!(dep.stage(), JobStage::Waiting);
        assert!(matches!(dep.begin(), Err(Error::JobNotFound { .. })));
    }

    #[test]
    fn test_merge_rejected() {
        let jm = manager();
        let (unit, _) = prepare_unit("a.service");
        let (other, _) = prepare_unit("b.service");
        let stop = jm.new_job(JobKind::Stop, &unit);
        let start = jm.new_job(JobKind::Start, &unit);
        let foreign = jm.new_job(JobKind::Start, &other);
        jm.add_relation(foreign.id(), JobRelation::Wants, start.id())
            .unwrap();

        assert!(matches!(
            jm.merge(stop.id(), start.id()),
            Err(Error::Unmergeable { .. })
        ));
        assert_eq!(stop.kind(), JobKind::Stop);
        assert!(stop.relations().peers().is_empty());
        assert!(start.relations().contains(JobRelation::WantedBy, foreign.id()));
        assert_eq!(jm.len(), 3);

        assert!(matches!(
            jm.merge(start.id(), foreign.id()),
            Err(Error::UnitMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_merge_finished_job() {
        let jm = manager();
        let (unit, _) = prepare_unit("a.service");
        let done = jm.new_job(JobKind::Start, &unit);
        let incoming = jm.new_job(JobKind::Start, &unit);
        jm.run(done.id()).await.unwrap();
        assert!(matches!(
            jm.merge(done.id(), incoming.id()),
            Err(Error::JobNotWaiting { .. })
        ));
    }

    #[test]
    fn test_order() {
        let jm = manager();
        let (a, _) = prepare_unit("a.service");
        let (b, _) = prepare_unit("b.service");
        let (c, _) = prepare_unit("c.service");
        let ja = jm.new_job(JobKind::Start, &a);
        let jb = jm.new_job(JobKind::Start, &b);
        let jc = jm.new_job(JobKind::Start, &c);

        /* c before b, a after b */
        jm.add_relation(jc.id(), JobRelation::Before, jb.id()).unwrap();
        jm.add_relation(ja.id(), JobRelation::After, jb.id()).unwrap();
        assert_eq!(jm.order().unwrap(), vec![jc.id(), jb.id(), ja.id()]);

        jm.add_relation(ja.id(), JobRelation::Before, jc.id()).unwrap();
        match jm.order() {
            Err(Error::OrderingCycle { ids }) => assert_eq!(ids.len(), 3),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_dependency_failure() {
        let jm = manager();
        let (db, db_rec) = prepare_unit("db.service");
        let (web, web_rec) = prepare_unit("web.service");
        db_rec.set_fail_start(true);
        let jdb = jm.new_job(JobKind::Start, &db);
        let jweb = jm.new_job(JobKind::Start, &web);
        jm.add_relation(jweb.id(), JobRelation::Requires, jdb.id())
            .unwrap();
        jm.add_relation(jweb.id(), JobRelation::After, jdb.id())
            .unwrap();

        let outcomes = jm.dispatch().await.unwrap();
        assert_eq!(outcomes[0].0, jdb.id());
        assert!(matches!(outcomes[0].1, Err(Error::NotSupported)));
        assert_eq!(outcomes[1].0, jweb.id());
        assert!(matches!(outcomes[1].1, Err(Error::DependencyFailed { .. })));
        assert_eq!(web_rec.starts(), 0);

        let info = jm.info(jweb.id()).unwrap();
        assert_eq!(
            info.to_string(),
            format!("{} web.service start failed (dependency failed: db.service)", jweb.id())
        );
        /* nothing left to dispatch */
        assert!(jm.dispatch().await.unwrap().is_empty());
    }
}
