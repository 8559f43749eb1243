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

//! Functions for generating entry parsing expressions.
use crate::unit_parser::{
    attribute::EntryAttributes, transform_default::transform_default, type_transform::is_option,
};
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{Field, Ident, Result};

/// Generate the initializer of a field in `Default::default()`.
pub(crate) fn gen_entry_default(
    field: &Field,
    name: &Ident,
    attributes: &EntryAttributes,
) -> Result<TokenStream> {
    if attributes.append {
        return Ok(quote! { #name: ::std::vec::Vec::new() });
    }
    match &attributes.default {
        None => Ok(quote! { #name: ::std::default::Default::default() }),
        Some(v) => {
            let value = transform_default(&field.ty, v)?;
            Ok(quote! { #name: #value })
        }
    }
}

/// Generate an arm of the `match` on the entry key.
/// example:
/// ```ignore
/// "ExecStart" => {
///     self.ExecStart = unit_parser::UnitEntry::parse_from_str(__value)
///         .map_err(|_| unit_parser::error::value_parsing(__key, __value))?;
/// }
/// ```
pub(crate) fn gen_entry_parse(
    field: &Field,
    name: &Ident,
    attributes: &EntryAttributes,
) -> Result<TokenStream> {
    let key = attributes
        .key
        .as_ref()
        .map(|k| k.into_token_stream())
        .unwrap_or_else(|| format!("{}", name).into_token_stream());
    let parse = quote! {
        unit_parser::UnitEntry::parse_from_str(__part)
            .map_err(|_| unit_parser::error::value_parsing(__key, __value))?
    };

    if attributes.append {
        return Ok(quote! {
            #key => {
                if __value.trim().is_empty() {
                    self.#name.clear();
                } else {
                    for __item in unit_parser::parse_list(__value) {
                        let __part = __item.as_str();
                        self.#name.push(#parse);
                    }
                }
            }
        });
    }

    let assign = if is_option(&field.ty) {
        quote! { self.#name = Some(#parse); }
    } else {
        quote! { self.#name = #parse; }
    };
    Ok(quote! {
        #key => {
            let __part = __value;
            #assign
        }
    })
}
