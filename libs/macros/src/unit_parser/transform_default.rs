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

//! Function for transforming string literal default values.
use proc_macro2::TokenStream;
use quote::{quote, ToTokens};
use syn::{Error, Expr, Lit, Type};

/// If a field is a [String] and its default is a string literal, add
/// `.to_string()` to the literal.
pub(crate) fn transform_default(ty: &Type, default: &Expr) -> Result<TokenStream, Error> {
    if let Type::Path(inner) = ty {
        let path = inner
            .path
            .segments
            .last()
            .ok_or_else(|| Error::new_spanned(ty, "Invalid type."))?;
        if path.ident == "String" {
            if let Expr::Lit(expr) = default {
                if let Lit::Str(string) = &expr.lit {
                    return Ok(quote! { #string.to_string() });
                }
            }
        }
    }
    Ok(default.into_token_stream())
}
