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

//! Edges of the job graph, stored as sets of job ids.
use super::kind::JobId;
use std::collections::HashSet;

/// The kind of an edge between two jobs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum JobRelation {
    /// soft dependency, never waited on
    Wants,
    /// hard dependency, waited on before executing
    Requires,
    ///
    Conflicts,
    ///
    WantedBy,
    ///
    RequiredBy,
    ///
    ConflictedBy,
    /// ordering hint: this job goes first
    Before,
    /// ordering hint: this job goes last
    After,
}

impl JobRelation {
    /// every relation, outgoing ones first
    pub const ALL: [JobRelation; 8] = [
        JobRelation::Wants,
        JobRelation::Requires,
        JobRelation::Conflicts,
        JobRelation::WantedBy,
        JobRelation::RequiredBy,
        JobRelation::ConflictedBy,
        JobRelation::Before,
        JobRelation::After,
    ];

    /// The relation recorded on the other end of the edge.
    pub fn inverse(self) -> JobRelation {
        match self {
            JobRelation::Wants => JobRelation::WantedBy,
            JobRelation::Requires => JobRelation::RequiredBy,
            JobRelation::Conflicts => JobRelation::ConflictedBy,
            JobRelation::WantedBy => JobRelation::Wants,
            JobRelation::RequiredBy => JobRelation::Requires,
            JobRelation::ConflictedBy => JobRelation::Conflicts,
            JobRelation::Before => JobRelation::After,
            JobRelation::After => JobRelation::Before,
        }
    }
}

/// All relation sets of one job.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobRelations {
    wants: HashSet<JobId>,
    requires: HashSet<JobId>,
    conflicts: HashSet<JobId>,
    wanted_by: HashSet<JobId>,
    required_by: HashSet<JobId>,
    conflicted_by: HashSet<JobId>,
    before: HashSet<JobId>,
    after: HashSet<JobId>,
}

impl JobRelations {
    ///
    pub fn new() -> Self {
        JobRelations::default()
    }

    ///
    pub fn get(&self, relation: JobRelation) -> &HashSet<JobId> {
        match relation {
            JobRelation::Wants => &self.wants,
            JobRelation::Requires => &self.requires,
            JobRelation::Conflicts => &self.conflicts,
            JobRelation::WantedBy => &self.wanted_by,
            JobRelation::RequiredBy => &self.required_by,
            JobRelation::ConflictedBy => &self.conflicted_by,
            JobRelation::Before => &self.before,
            JobRelation::After => &self.after,
        }
    }

    fn get_mut(&mut self, relation: JobRelation) -> &mut HashSet<JobId> {
        match relation {
            JobRelation::Wants => &mut self.wants,
            JobRelation::Requires => &mut self.requires,
            JobRelation::Conflicts => &mut self.conflicts,
            JobRelation::WantedBy => &mut self.wanted_by,
            JobRelation::RequiredBy => &mut self.required_by,
            JobRelation::ConflictedBy => &mut self.conflicted_by,
            JobRelation::Before => &mut self.before,
            JobRelation::After => &mut self.after,
        }
    }

    /// Returns false if the edge was already present.
    pub fn insert(&mut self, relation: JobRelation, id: JobId) -> bool {
        self.get_mut(relation).insert(id)
    }

    ///
    pub fn remove(&mut self, relation: JobRelation, id: JobId) -> bool {
        self.get_mut(relation).remove(&id)
    }

    ///
    pub fn contains(&self, relation: JobRelation, id: JobId) -> bool {
        self.get(relation).contains(&id)
    }

    /// Add every edge of `other` to self.
    pub fn union(&mut self, other: &JobRelations) {
        for relation in JobRelation::ALL {
            self.get_mut(relation)
                .extend(other.get(relation).iter().copied());
        }
    }

    /// Point every edge at `old` to `new` instead, dropping edges that would
    /// make `owner` refer to itself.
    pub fn replace(&mut self, old: JobId, new: JobId, owner: JobId) {
        for relation in JobRelation::ALL {
            let set = self.get_mut(relation);
            if set.remove(&old) && new != owner {
                set.insert(new);
            }
        }
    }

    /// Remove every edge to `id`.
    pub fn detach(&mut self, id: JobId) {
        for relation in JobRelation::ALL {
            self.get_mut(relation).remove(&id);
        }
    }

    /// every job referenced by any relation
    pub fn peers(&self) -> HashSet<JobId> {
        JobRelation::ALL
            .iter()
            .flat_map(|r| self.get(*r).iter().copied())
            .collect()
    }

    /// No one wants, requires, or conflicts the owner.
    pub fn is_orphan(&self) -> bool {
        self.wanted_by.is_empty() && self.required_by.is_empty() && self.conflicted_by.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(v: u64) -> JobId {
        JobId::from(v)
    }

    #[test]
    fn test_inverse() {
        for relation in JobRelation::ALL {
            assert_eq!(relation.inverse().inverse(), relation);
            assert_ne!(relation.inverse(), relation);
        }
        assert_eq!(JobRelation::Requires.inverse(), JobRelation::RequiredBy);
        assert_eq!(JobRelation::Before.inverse(), JobRelation::After);
    }

    #[test]
    fn test_union_is_idempotent() {
        let mut a = JobRelations::new();
        a.insert(JobRelation::Requires, id(2));
        a.insert(JobRelation::Wants, id(3));

        let mut b = JobRelations::new();
        b.insert(JobRelation::Requires, id(2));
        b.insert(JobRelation::RequiredBy, id(4));
        b.insert(JobRelation::After, id(5));

        a.union(&b);
        assert_eq!(a.get(JobRelation::Requires).len(), 1);
        assert!(a.contains(JobRelation::Wants, id(3)));
        assert!(a.contains(JobRelation::RequiredBy, id(4)));
        assert!(a.contains(JobRelation::After, id(5)));
        assert!(!a.insert(JobRelation::After, id(5)));
    }

    #[test]
    fn test_replace() {
        let mut r = JobRelations::new();
        r.insert(JobRelation::Requires, id(2));
        r.insert(JobRelation::Before, id(2));
        r.insert(JobRelation::Wants, id(3));

        r.replace(id(2), id(7), id(1));
        assert!(r.contains(JobRelation::Requires, id(7)));
        assert!(r.contains(JobRelation::Before, id(7)));
        assert!(!r.contains(JobRelation::Requires, id(2)));

        /* repointing at the owner drops the edge */
        r.replace(id(3), id(1), id(1));
        assert!(r.get(JobRelation::Wants).is_empty());
    }

    #[test]
    fn test_orphan() {
        let mut r = JobRelations::new();
        r.insert(JobRelation::Requires, id(2));
        r.insert(JobRelation::After, id(2));
        assert!(r.is_orphan());

        r.insert(JobRelation::ConflictedBy, id(3));
        assert!(!r.is_orphan());
        r.remove(JobRelation::ConflictedBy, id(3));
        assert!(r.is_orphan());
        assert_eq!(r.peers().len(), 1);
    }
}
