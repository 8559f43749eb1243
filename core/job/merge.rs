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

//! Collapsing two pending jobs of one unit into one.
use super::entry::JobData;
use super::kind::JobKind;
use crate::error::*;

/// The kind of the job resulting from merging `incoming` into `existing`,
/// None if the two can not be merged.
///
/// | existing \ incoming | start   | reload  | restart |
/// |---------------------|---------|---------|---------|
/// | start               | start   | reload  | restart |
/// | reload              | reload  |         | restart |
/// | restart             | restart | restart |         |
///
/// Stop never merges.
pub fn job_merge_kind(existing: JobKind, incoming: JobKind) -> Option<JobKind> {
    match (existing, incoming) {
        (JobKind::Start, JobKind::Start) => Some(JobKind::Start),
        (JobKind::Start, JobKind::Reload) => Some(JobKind::Reload),
        (JobKind::Start, JobKind::Restart) => Some(JobKind::Restart),
        (JobKind::Reload, JobKind::Start) => Some(JobKind::Reload),
        (JobKind::Reload, JobKind::Restart) => Some(JobKind::Restart),
        (JobKind::Restart, JobKind::Start) => Some(JobKind::Restart),
        (JobKind::Restart, JobKind::Reload) => Some(JobKind::Restart),
        _ => None,
    }
}

/// Merge `incoming` into `existing`: the kind is replaced by the merged one
/// and every relation set of `incoming` is added to `existing`. That covers
/// the six dependency sets and also the `before`/`after` ordering hints.
///
/// On failure neither side is touched.
pub(super) fn job_merge(existing: &mut JobData, incoming: &JobData) -> Result<()> {
    let kind = job_merge_kind(existing.kind, incoming.kind).ok_or(Error::Unmergeable {
        existing: existing.kind,
        incoming: incoming.kind,
    })?;

    existing.kind = kind;
    existing.relations.union(&incoming.relations);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::kind::JobId;
    use crate::job::relation::JobRelation;

    fn data(kind: JobKind, edges: &[(JobRelation, u64)]) -> JobData {
        let mut d = JobData::new(kind);
        for (relation, id) in edges {
            d.relations.insert(*relation, JobId::from(*id));
        }
        d
    }

    #[test]
    fn test_merge_table() {
        use JobKind::*;
        assert_eq!(job_merge_kind(Start, Start), Some(Start));
        assert_eq!(job_merge_kind(Start, Reload), Some(Reload));
        assert_eq!(job_merge_kind(Reload, Start), Some(Reload));
        assert_eq!(job_merge_kind(Reload, Reload), None);
        assert_eq!(job_merge_kind(Reload, Restart), Some(Restart));
        assert_eq!(job_merge_kind(Restart, Reload), Some(Restart));
        assert_eq!(job_merge_kind(Restart, Restart), None);
        for kind in [Start, Stop, Reload, Restart] {
            assert_eq!(job_merge_kind(Stop, kind), None);
            assert_eq!(job_merge_kind(kind, Stop), None);
        }
    }

    #[test]
    fn test_merge_start_reload() {
        let mut a = data(
            JobKind::Start,
            &[(JobRelation::Requires, 2), (JobRelation::WantedBy, 3)],
        );
        let b = data(
            JobKind::Reload,
            &[
                (JobRelation::Requires, 2),
                (JobRelation::Wants, 4),
                (JobRelation::ConflictedBy, 5),
                (JobRelation::After, 6),
            ],
        );

        job_merge(&mut a, &b).unwrap();
        assert_eq!(a.kind, JobKind::Reload);
        for (relation, id) in [
            (JobRelation::Requires, 2),
            (JobRelation::WantedBy, 3),
            (JobRelation::Wants, 4),
            (JobRelation::ConflictedBy, 5),
            (JobRelation::After, 6),
        ] {
            assert!(a.relations.contains(relation, JobId::from(id)));
        }
        assert_eq!(a.relations.get(JobRelation::Requires).len(), 1);
    }

    #[test]
    fn test_merge_stop_untouched() {
        let mut a = data(JobKind::Stop, &[(JobRelation::Requires, 2)]);
        let b = data(JobKind::Start, &[(JobRelation::Wants, 3)]);
        let (a_before, b_before) = (a.relations.clone(), b.relations.clone());

        let err = job_merge(&mut a, &b).unwrap_err();
        assert!(matches!(
            err,
            Error::Unmergeable {
                existing: JobKind::Stop,
                incoming: JobKind::Start
            }
        ));
        assert_eq!(a.kind, JobKind::Stop);
        assert_eq!(a.relations, a_before);
        assert_eq!(b.kind, JobKind::Start);
        assert_eq!(b.relations, b_before);
    }
}
