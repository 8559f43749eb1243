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

//! The capability set every unit kind offers to the job engine, and the
//! [`UnitX`] wrapper the engine works with.
use super::state::UnitActiveState;
use crate::error::*;
use crate::job::JobId;
use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// The behavior of a concrete unit kind (service, and later socket, target...).
///
/// The job engine only ever talks to a unit through this trait, so adding a
/// unit kind never touches the scheduler.
#[async_trait]
pub trait SubUnit: Send + Sync {
    /// Start a Unit
    /// Each Sub Unit need to implement its own start function
    async fn start(&self) -> Result<()>;

    ///
    async fn stop(&self) -> Result<()>;

    /// return NotSupported for default, if the sub unit not realizing the method
    async fn reload(&self) -> Result<()> {
        Err(Error::NotSupported)
    }

    ///
    fn can_reload(&self) -> bool {
        false
    }

    /// Get the the unit state
    ///
    /// Every sub unit can define self states and map to [`UnitActiveState`]
    fn current_active_state(&self) -> UnitActiveState;

    /// Return the state of subunit, i.e. (running for .service)
    fn get_subunit_state(&self) -> String;
}

/// A named unit as seen by the job engine.
pub struct UnitX {
    id: String,
    sub: Box<dyn SubUnit>,
    job: Mutex<Option<JobId>>,
}

impl fmt::Debug for UnitX {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitX")
            .field("id", &self.id)
            .field("job", &*self.job_slot())
            .finish()
    }
}

impl UnitX {
    ///
    pub fn new(id: &str, sub: Box<dyn SubUnit>) -> Arc<UnitX> {
        Arc::new(UnitX {
            id: id.to_string(),
            sub,
            job: Mutex::new(None),
        })
    }

    /// the unit name, like "foo.service"
    pub fn id(&self) -> &str {
        &self.id
    }

    ///
    pub async fn start(&self) -> Result<()> {
        log::debug!("Starting {}", self.id);
        let ret = self.sub.start().await;
        self.log_result("start", &ret);
        ret
    }

    ///
    pub async fn stop(&self) -> Result<()> {
        log::debug!("Stopping {}", self.id);
        let ret = self.sub.stop().await;
        self.log_result("stop", &ret);
        ret
    }

    /// Units that can not reload are refused without calling into them.
    pub async fn reload(&self) -> Result<()> {
        if !self.sub.can_reload() {
            log::info!("{} does not support reload", self.id);
            return Err(Error::NotSupported);
        }
        log::debug!("Reloading {}", self.id);
        let ret = self.sub.reload().await;
        self.log_result("reload", &ret);
        ret
    }

    /// fine grained state of the concrete unit kind
    pub fn sub_state(&self) -> String {
        self.sub.get_subunit_state()
    }

    ///
    pub fn active_state(&self) -> UnitActiveState {
        self.sub.current_active_state()
    }

    /// the job currently running against this unit, if any
    pub fn job(&self) -> Option<JobId> {
        *self.job_slot()
    }

    pub(crate) fn attach_job(&self, id: JobId) {
        let mut slot = self.job_slot();
        if let Some(old) = *slot {
            log::warn!("{}: job {} replaces running job {}", self.id, id, old);
        }
        *slot = Some(id);
    }

    pub(crate) fn detach_job(&self, id: JobId) {
        let mut slot = self.job_slot();
        if *slot == Some(id) {
            *slot = None;
        }
    }

    fn job_slot(&self) -> MutexGuard<'_, Option<JobId>> {
        self.job.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn log_result(&self, op: &str, ret: &Result<()>) {
        match ret {
            Ok(()) => log::info!("{}: {} succeeded, now {}", self.id, op, self.sub_state()),
            Err(e) => log::error!("{}: failed to {}: {}", self.id, op, e),
        }
    }
}
