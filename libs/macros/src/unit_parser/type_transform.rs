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

//! Functions for confirming types.
use syn::Type;

fn path_idents(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(typepath) if typepath.qself.is_none() => Some(
            typepath
                .path
                .segments
                .iter()
                .fold(String::new(), |mut acc, v| {
                    acc.push_str(&v.ident.to_string());
                    acc.push(':');
                    acc
                }),
        ),
        _ => None,
    }
}

/// Determines if a [syn::Type] is an [Option].
pub(crate) fn is_option(ty: &Type) -> bool {
    path_idents(ty).map_or(false, |p| {
        ["Option:", "std:option:Option:", "core:option:Option:"].contains(&p.as_str())
    })
}

/// Determines if a [syn::Type] is a [Vec].
pub(crate) fn is_vec(ty: &Type) -> bool {
    path_idents(ty).map_or(false, |p| {
        ["Vec:", "std:vec:Vec:", "alloc:vec:Vec:"].contains(&p.as_str())
    })
}
