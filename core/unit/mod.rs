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

//! Units: the objects jobs act on.
pub mod base;
pub mod service;
pub mod state;

pub use base::{SubUnit, UnitX};
pub use service::{ServiceDefinition, ServiceState, ServiceType, ServiceUnit, UnitDeps};
pub use state::UnitActiveState;

#[cfg(test)]
pub(crate) mod test_utils;
