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

//! Parsing of the `#[entry(...)]` attribute.
use crate::unit_parser::type_transform::is_vec;
use syn::{Error, Expr, Field, LitStr, Token};

/// Attributes valid for section entries.
#[derive(Default)]
pub(crate) struct EntryAttributes {
    /// value used until the entry is parsed
    pub(crate) default: Option<Expr>,
    /// key name if it is not the field name
    pub(crate) key: Option<LitStr>,
    /// every occurrence appends to a `Vec`
    pub(crate) append: bool,
}

impl EntryAttributes {
    pub(crate) fn parse_attributes(input: &Field) -> syn::Result<Self> {
        let mut result = EntryAttributes::default();
        for attribute in input.attrs.iter() {
            if !attribute.path().is_ident("entry") {
                continue;
            }
            attribute.parse_nested_meta(|nested| {
                if nested.path.is_ident("default") {
                    nested.input.parse::<Token![=]>()?;
                    result.default = Some(nested.input.parse()?);
                    Ok(())
                } else if nested.path.is_ident("key") {
                    nested.input.parse::<Token![=]>()?;
                    result.key = Some(nested.input.parse()?);
                    Ok(())
                } else if nested.path.is_ident("append") {
                    result.append = true;
                    Ok(())
                } else {
                    Err(Error::new_spanned(attribute, "Not a valid entry attribute."))
                }
            })?;
        }

        if result.append && result.default.is_some() {
            return Err(Error::new_spanned(
                input,
                "`append` and `default` cannot co-exist.",
            ));
        }
        if result.append && !is_vec(&input.ty) {
            return Err(Error::new_spanned(
                input,
                "`append` attributed fields should be `Vec`s.",
            ));
        }
        Ok(result)
    }
}
