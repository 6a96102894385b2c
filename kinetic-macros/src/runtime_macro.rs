use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, ItemFn, ReturnType, Stmt};

use crate::helpers::kinetic_crate_path;

/// See `#[kinetic_macros::runtime]` for details.
pub fn runtime_macro(item: TokenStream, test: bool) -> TokenStream {
    let kinetic = kinetic_crate_path();
    let input = parse_macro_input!(item as ItemFn);

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = input;

    let mut stmts = block.stmts;

    // Check if the function has an explicit return type
    let has_return_type = match &sig.output {
        ReturnType::Default => false,
        ReturnType::Type(_, ty) => match &**ty {
            syn::Type::Tuple(tuple) if tuple.elems.is_empty() => false,
            _ => true,
        },
    };

    // Extract the last statement if it's an expression (potential return value)
    let return_expr = if has_return_type {
        match stmts.pop() {
            Some(Stmt::Expr(expr, None)) => Some(expr),
            Some(stmt) => {
                stmts.push(stmt);
                None
            }
            None => None,
        }
    } else {
        None
    };

    // Define the #[tokio::main] / #[tokio::test] tokio macro attribute.
    let tokio_crate = format!("{}::utils::tokio", kinetic);
    let tokio_main_attr = match test {
        true => quote! {#[#kinetic::utils::tokio::test(crate = #tokio_crate)]},
        false => quote! {#[#kinetic::utils::tokio::main(crate = #tokio_crate)]},
    };

    let mut body = vec![quote! {
        #kinetic::utils::task::init_task_channel().await;
    }];

    // A trailing `()` is dropped: it is re-added as the return expression if needed.
    body.extend(stmts.into_iter().map(|stmt| match stmt {
        Stmt::Expr(ref exp, _) => match exp {
            syn::Expr::Tuple(tuple) if tuple.elems.is_empty() => quote!(),
            _ => quote! { #stmt },
        },
        _ => quote! { #stmt },
    }));

    // Wait for all dynamically spawned tasks to complete.
    body.push(quote! {
        #kinetic::utils::task::wait_all_tasks().await;
    });

    if let Some(return_stmt) = return_expr {
        body.push(quote! { #return_stmt });
    }

    let expanded = quote! {
        #tokio_main_attr
        #(#attrs)*
        #vis #sig {
            #(#body)*
        }
    };

    TokenStream::from(expanded)
}
